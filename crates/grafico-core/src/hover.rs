// File: crates/grafico-core/src/hover.rs
// Summary: Floating data labels shown while the pointer is over a series.

use crate::geometry::BBox;
use crate::host::MouseEvent;
use crate::surface::{ElementId, ElementSet, Style, Surface};
use crate::types::{HOVER_TRANSITION, TEXT_PADDING};

/// Pointer events routed to a drawn element by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter(MouseEvent),
    Move(MouseEvent),
    Leave,
}

/// Which paint attribute carries the series colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColourTarget {
    Fill,
    Stroke,
}

/// Appearance of a hover label.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverStyle {
    pub font_size: f64,
    pub box_colour: String,
    pub text_colour: String,
}

/// Hover label bound to one series element.
#[derive(Clone, Debug)]
pub struct HoverLabel {
    target: ElementId,
    colour_target: ColourTarget,
    colour: String,
    hover_colour: String,
    rect: ElementId,
    text: ElementId,
    set: ElementSet,
    text_size: (f64, f64),
    font_size: f64,
    /// Host element offset within the page.
    offset: (f64, f64),
    active: bool,
}

impl HoverLabel {
    /// Draw the (hidden) label box for `target`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        surface: &mut dyn Surface,
        target: ElementId,
        label: &str,
        colour_target: ColourTarget,
        colour: &str,
        hover_colour: &str,
        style: &HoverStyle,
        offset: (f64, f64),
    ) -> Self {
        let text = surface.text(
            0.0,
            0.0,
            label,
            Style::new()
                .font(style.font_size, crate::scene::DEFAULT_FONT)
                .fill(style.text_colour.clone())
                .opacity(1.0),
        );
        let tb = surface.bbox(text);
        let rect = surface.rect(
            BBox::new(
                -(tb.width / 2.0) - TEXT_PADDING,
                -(tb.height / 2.0) - TEXT_PADDING,
                tb.width + TEXT_PADDING * 2.0,
                tb.height + TEXT_PADDING * 2.0,
            ),
            TEXT_PADDING * 1.5,
            Style::new().fill(style.box_colour.clone()).stroke("none").opacity(1.0),
        );
        surface.to_front(text);
        let set: ElementSet = [rect, text].into_iter().collect();
        set.set_style(surface, &Style::new().opacity(0.0));
        set.to_front(surface);

        Self {
            target,
            colour_target,
            colour: colour.to_string(),
            hover_colour: hover_colour.to_string(),
            rect,
            text,
            set,
            text_size: (tb.width, tb.height),
            font_size: style.font_size,
            offset,
            active: false,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Label box and text, for z-ordering.
    pub fn elements(&self) -> &ElementSet {
        &self.set
    }

    pub fn is_visible(&self) -> bool {
        self.active
    }

    /// React to one pointer event. Moves before an enter are ignored.
    pub fn handle(&mut self, surface: &mut dyn Surface, event: &PointerEvent) {
        match event {
            PointerEvent::Enter(mouse) => {
                self.active = true;
                surface.animate(self.target, &self.paint(&self.hover_colour), HOVER_TRANSITION);
                self.place(surface, mouse);
            }
            PointerEvent::Move(mouse) => {
                if self.active {
                    self.place(surface, mouse);
                }
            }
            PointerEvent::Leave => {
                self.active = false;
                surface.animate(self.target, &self.paint(&self.colour), HOVER_TRANSITION);
                self.set.set_style(surface, &Style::new().opacity(0.0));
            }
        }
    }

    fn paint(&self, colour: &str) -> Style {
        match self.colour_target {
            ColourTarget::Fill => Style::new().fill(colour).stroke(colour),
            ColourTarget::Stroke => Style::new().stroke(colour),
        }
    }

    /// Centre the box above the pointer, then pull it back inside the surface.
    fn place(&self, surface: &mut dyn Surface, mouse: &MouseEvent) {
        let (px, py) = mouse.page_position();
        let (mx, my) = (px - self.offset.0, py - self.offset.1);
        let (w, h) = self.text_size;
        let lift = self.font_size * 1.5;

        surface.set_position(self.rect, mx - w / 2.0 - TEXT_PADDING, my - h / 2.0 - lift - TEXT_PADDING);
        surface.set_position(self.text, mx, my - lift);
        self.set.set_style(surface, &Style::new().opacity(1.0));

        let (width, height) = surface.size();
        let (dx, dy) = surface.bbox(self.rect).clamp_offset(width, height);
        if dx != 0.0 || dy != 0.0 {
            self.set.translate(surface, dx, dy);
        }
    }
}
