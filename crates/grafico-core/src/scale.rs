// File: crates/grafico-core/src/scale.rs
// Summary: Maps data values and point indices to surface pixels.

use crate::axis::ValueAxis;
use crate::geometry::Coordinate;
use crate::layout::Layout;
use crate::normaliser::NormalisationResult;

/// Value/index to pixel transform for one render.
/// Every method is a pure function of the state captured at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotScale {
    /// x of the point at index 0.
    pub x_origin: f64,
    /// Horizontal distance between consecutive points.
    pub x_step: f64,
    /// Bottom edge of the plot area.
    pub baseline: f64,
    pub plot_height: f64,
    pub start_value: f64,
    /// Value spanning the full plot height.
    pub total: f64,
}

impl PlotScale {
    pub fn new(n: &NormalisationResult, axis: &ValueAxis, layout: &Layout) -> Self {
        let mut total = if n.start_value == 0.0 { axis.top_value } else { n.range };
        if !(total > 0.0) || !total.is_finite() {
            total = axis.label_count as f64 * n.step;
        }
        Self {
            x_origin: layout.insets.left + layout.plot_padding,
            x_step: layout.step,
            baseline: layout.insets.top + layout.graph_height,
            plot_height: layout.graph_height,
            start_value: n.start_value,
            total,
        }
    }

    /// Height in pixels that `value` spans on this scale.
    #[inline]
    pub fn normalise(&self, value: f64) -> f64 {
        value / self.total * self.plot_height
    }

    #[inline]
    pub fn x(&self, index: usize) -> f64 {
        self.x_origin + index as f64 * self.x_step
    }

    #[inline]
    pub fn y(&self, value: f64) -> f64 {
        self.baseline + self.normalise(self.start_value) - self.normalise(value)
    }

    pub fn coordinate(&self, value: f64, index: usize) -> Coordinate {
        Coordinate::new(self.x(index), self.y(value))
    }

    pub fn coordinates(&self, values: &[f64]) -> Vec<Coordinate> {
        values.iter().enumerate().map(|(i, &v)| self.coordinate(v, i)).collect()
    }

    /// y of value 0, held inside the plot area; bars grow from here.
    pub fn zero_line(&self) -> f64 {
        self.y(0.0).clamp(self.baseline - self.plot_height, self.baseline)
    }
}
