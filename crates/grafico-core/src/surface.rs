// File: crates/grafico-core/src/surface.rs
// Summary: Vector drawing surface abstraction used by charts; renderer-agnostic.

use std::time::Duration;

use crate::geometry::BBox;

/// Handle to an element drawn on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Cubic Bézier: two control points, then the end point.
    CurveTo((f64, f64), (f64, f64), (f64, f64)),
    Close,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Presentation attributes. Also used as a patch: only `Some` fields apply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub text_anchor: Option<TextAnchor>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, c: impl Into<String>) -> Self {
        self.fill = Some(c.into());
        self
    }

    pub fn stroke(mut self, c: impl Into<String>) -> Self {
        self.stroke = Some(c.into());
        self
    }

    pub fn stroke_width(mut self, w: f64) -> Self {
        self.stroke_width = Some(w);
        self
    }

    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = Some(o);
        self
    }

    pub fn fill_opacity(mut self, o: f64) -> Self {
        self.fill_opacity = Some(o);
        self
    }

    pub fn font(mut self, size: f64, family: impl Into<String>) -> Self {
        self.font_size = Some(size);
        self.font_family = Some(family.into());
        self
    }

    pub fn anchor(mut self, a: TextAnchor) -> Self {
        self.text_anchor = Some(a);
        self
    }

    /// Overwrite every attribute `patch` sets.
    pub fn merge(&mut self, patch: &Style) {
        macro_rules! over {
            ($($f:ident),*) => { $( if patch.$f.is_some() { self.$f = patch.$f.clone(); } )* };
        }
        over!(fill, stroke, stroke_width, opacity, fill_opacity, font_size, font_family, text_anchor);
    }

    /// Element is drawn but invisible.
    pub fn is_hidden(&self) -> bool {
        self.opacity == Some(0.0)
    }
}

/// A vector drawing surface.
///
/// Positions are in surface pixels, origin top-left. Ids handed out by one
/// surface are only meaningful to that surface; unknown ids are ignored.
pub trait Surface {
    fn set_size(&mut self, width: f64, height: f64);
    fn size(&self) -> (f64, f64);

    /// Start an empty path; extend it with [`Surface::push_path`].
    fn path(&mut self, style: Style) -> ElementId;
    fn push_path(&mut self, id: ElementId, cmd: PathCommand);
    fn rect(&mut self, bbox: BBox, radius: f64, style: Style) -> ElementId;
    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: Style) -> ElementId;
    /// Text centred vertically on `y`; horizontal alignment per the style's anchor.
    fn text(&mut self, x: f64, y: f64, content: &str, style: Style) -> ElementId;
    fn image(&mut self, src: &str, bbox: BBox, style: Style) -> ElementId;

    fn set_style(&mut self, id: ElementId, patch: &Style);
    /// Transition to `patch` over `duration`.
    fn animate(&mut self, id: ElementId, patch: &Style, duration: Duration);
    /// Move the element's anchor point (rect/image corner, circle centre, text anchor).
    fn set_position(&mut self, id: ElementId, x: f64, y: f64);
    fn translate(&mut self, id: ElementId, dx: f64, dy: f64);
    /// Scale geometry by `(sx, sy)` about `origin`. Circles and text keep their
    /// aspect and use the smaller factor for radius and font size.
    fn scale(&mut self, id: ElementId, sx: f64, sy: f64, origin: (f64, f64));
    fn bbox(&self, id: ElementId) -> BBox;
    /// Raise above every other element.
    fn to_front(&mut self, id: ElementId);

    fn move_to(&mut self, id: ElementId, x: f64, y: f64) {
        self.push_path(id, PathCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, id: ElementId, x: f64, y: f64) {
        self.push_path(id, PathCommand::LineTo(x, y));
    }

    /// Smooth segment from the previous point `from` to `(x, y)`, with
    /// horizontal control handles of length `w`.
    fn curve_to(&mut self, id: ElementId, from: (f64, f64), x: f64, y: f64, w: f64) {
        self.push_path(id, PathCommand::CurveTo((from.0 + w, from.1), (x - w, y), (x, y)));
    }

    fn close_path(&mut self, id: ElementId) {
        self.push_path(id, PathCommand::Close);
    }
}

/// Group of elements manipulated together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSet(Vec<ElementId>);

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ElementId) {
        self.0.push(id);
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_front(&self, surface: &mut dyn Surface) {
        for &id in &self.0 {
            surface.to_front(id);
        }
    }

    pub fn set_style(&self, surface: &mut dyn Surface, patch: &Style) {
        for &id in &self.0 {
            surface.set_style(id, patch);
        }
    }

    pub fn translate(&self, surface: &mut dyn Surface, dx: f64, dy: f64) {
        for &id in &self.0 {
            surface.translate(id, dx, dy);
        }
    }

    /// Scale the whole group about the centre of its bounding box.
    pub fn scale(&self, surface: &mut dyn Surface, sx: f64, sy: f64) {
        let Some(b) = self.bbox(surface) else { return };
        let origin = (b.x + b.width / 2.0, b.y + b.height / 2.0);
        for &id in &self.0 {
            surface.scale(id, sx, sy, origin);
        }
    }

    pub fn bbox(&self, surface: &dyn Surface) -> Option<BBox> {
        self.0.iter().map(|&id| surface.bbox(id)).reduce(|a, b| a.union(&b))
    }
}

impl FromIterator<ElementId> for ElementSet {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
