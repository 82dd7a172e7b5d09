// File: crates/grafico-core/src/types.rs
// Summary: Shared types and constants (paddings, text metrics, timings).

use std::time::Duration;

/// Gap added left of the widest vertical label.
pub const LABEL_GAP: f64 = 10.0;
/// Extra room reserved when vertical labels carry a unit suffix.
pub const UNIT_GAP: f64 = 6.0;
/// Fixed right padding.
pub const PADDING_RIGHT: f64 = 20.0;
/// Bottom padding before the horizontal label line is added.
pub const PADDING_BOTTOM: f64 = 20.0;
/// Length of axis tick marks.
pub const TICK_LENGTH: f64 = 5.0;
/// Padding inside hover label boxes.
pub const TEXT_PADDING: f64 = 4.0;
/// Duration of hover colour transitions.
pub const HOVER_TRANSITION: Duration = Duration::from_millis(200);

/// Average glyph advance as a fraction of the font size, for text estimates.
pub const GLYPH_ADVANCE: f64 = 0.6;
/// Line height as a fraction of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Space around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}
