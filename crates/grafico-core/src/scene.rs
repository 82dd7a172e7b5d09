// File: crates/grafico-core/src/scene.rs
// Summary: Retained in-memory surface; the element list renderers (SVG, Skia) consume.
// Notes:
// - Animations are recorded as transitions and their end state is applied
//   immediately, so the scene always reflects where an animation ends up.
// - Text extents are estimated from the font size; there is no font engine here.

use std::time::Duration;

use log::trace;

use crate::geometry::BBox;
use crate::surface::{ElementId, PathCommand, Style, Surface, TextAnchor};
use crate::types::{GLYPH_ADVANCE, LINE_HEIGHT};

/// Font used when a text style names none.
pub const DEFAULT_FONT: &str = "Arial";
const DEFAULT_FONT_SIZE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path(Vec<PathCommand>),
    Rect { bbox: BBox, radius: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Text { x: f64, y: f64, content: String },
    Image { src: String, bbox: BBox },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Path(_) => "path",
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Text { .. } => "text",
            Shape::Image { .. } => "image",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub shape: Shape,
    pub style: Style,
}

/// A recorded style animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub element: ElementId,
    pub to: Style,
    pub duration: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    width: f64,
    height: f64,
    elements: Vec<Element>,
    /// Paint order, back to front.
    order: Vec<ElementId>,
    transitions: Vec<Transition>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Elements back to front.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id.0))
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Paint position of `id`, 0 being the back-most element.
    pub fn z_index(&self, id: ElementId) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    fn add(&mut self, shape: Shape, style: Style) -> ElementId {
        let id = ElementId(self.elements.len());
        trace!("scene: add {} {:?}", shape.kind(), id);
        self.elements.push(Element { id, shape, style });
        self.order.push(id);
        id
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }
}

fn text_extent(content: &str, style: &Style) -> (f64, f64) {
    let size = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    (content.chars().count() as f64 * size * GLYPH_ADVANCE, size * LINE_HEIGHT)
}

fn path_bbox(cmds: &[PathCommand]) -> BBox {
    let points = cmds.iter().flat_map(|c| match *c {
        PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => vec![(x, y)],
        PathCommand::CurveTo(a, b, c) => vec![a, b, c],
        PathCommand::Close => Vec::new(),
    });
    points
        .map(|(x, y)| BBox::new(x, y, 0.0, 0.0))
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default()
}

impl Surface for Scene {
    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn path(&mut self, style: Style) -> ElementId {
        self.add(Shape::Path(Vec::new()), style)
    }

    fn push_path(&mut self, id: ElementId, cmd: PathCommand) {
        if let Some(Element { shape: Shape::Path(cmds), .. }) = self.get_mut(id) {
            cmds.push(cmd);
        }
    }

    fn rect(&mut self, bbox: BBox, radius: f64, style: Style) -> ElementId {
        self.add(Shape::Rect { bbox, radius }, style)
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, style: Style) -> ElementId {
        self.add(Shape::Circle { cx, cy, r }, style)
    }

    fn text(&mut self, x: f64, y: f64, content: &str, style: Style) -> ElementId {
        self.add(Shape::Text { x, y, content: content.to_string() }, style)
    }

    fn image(&mut self, src: &str, bbox: BBox, style: Style) -> ElementId {
        self.add(Shape::Image { src: src.to_string(), bbox }, style)
    }

    fn set_style(&mut self, id: ElementId, patch: &Style) {
        if let Some(e) = self.get_mut(id) {
            e.style.merge(patch);
        }
    }

    fn animate(&mut self, id: ElementId, patch: &Style, duration: Duration) {
        self.transitions.push(Transition { element: id, to: patch.clone(), duration });
        self.set_style(id, patch);
    }

    fn set_position(&mut self, id: ElementId, x: f64, y: f64) {
        if let Some(Element { shape: Shape::Path(cmds), .. }) = self.element(id) {
            // anchor of a path is its first point
            let origin = cmds.iter().find_map(|c| match *c {
                PathCommand::MoveTo(px, py) => Some((px, py)),
                _ => None,
            });
            if let Some((px, py)) = origin {
                self.translate(id, x - px, y - py);
            }
            return;
        }
        let Some(e) = self.get_mut(id) else { return };
        match &mut e.shape {
            Shape::Rect { bbox, .. } | Shape::Image { bbox, .. } => {
                bbox.x = x;
                bbox.y = y;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx = x;
                *cy = y;
            }
            Shape::Text { x: tx, y: ty, .. } => {
                *tx = x;
                *ty = y;
            }
            Shape::Path(_) => {}
        }
    }

    fn translate(&mut self, id: ElementId, dx: f64, dy: f64) {
        let Some(e) = self.get_mut(id) else { return };
        let shift = |(x, y): (f64, f64)| (x + dx, y + dy);
        match &mut e.shape {
            Shape::Rect { bbox, .. } | Shape::Image { bbox, .. } => {
                bbox.x += dx;
                bbox.y += dy;
            }
            Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Path(cmds) => {
                for c in cmds.iter_mut() {
                    *c = match *c {
                        PathCommand::MoveTo(x, y) => PathCommand::MoveTo(x + dx, y + dy),
                        PathCommand::LineTo(x, y) => PathCommand::LineTo(x + dx, y + dy),
                        PathCommand::CurveTo(a, b, p) => PathCommand::CurveTo(shift(a), shift(b), shift(p)),
                        PathCommand::Close => PathCommand::Close,
                    };
                }
            }
        }
    }

    fn scale(&mut self, id: ElementId, sx: f64, sy: f64, origin: (f64, f64)) {
        let Some(e) = self.get_mut(id) else { return };
        let (ox, oy) = origin;
        let at = |(x, y): (f64, f64)| (ox + (x - ox) * sx, oy + (y - oy) * sy);
        let uniform = sx.abs().min(sy.abs());
        match &mut e.shape {
            Shape::Rect { bbox, radius } => {
                *bbox = scale_bbox(*bbox, sx, sy, origin);
                *radius *= uniform;
            }
            Shape::Image { bbox, .. } => *bbox = scale_bbox(*bbox, sx, sy, origin),
            Shape::Circle { cx, cy, r } => {
                (*cx, *cy) = at((*cx, *cy));
                *r *= uniform;
            }
            Shape::Text { x, y, .. } => {
                (*x, *y) = at((*x, *y));
                if let Some(size) = e.style.font_size.as_mut() {
                    *size *= uniform;
                }
            }
            Shape::Path(cmds) => {
                for c in cmds.iter_mut() {
                    *c = match *c {
                        PathCommand::MoveTo(x, y) => {
                            let (x, y) = at((x, y));
                            PathCommand::MoveTo(x, y)
                        }
                        PathCommand::LineTo(x, y) => {
                            let (x, y) = at((x, y));
                            PathCommand::LineTo(x, y)
                        }
                        PathCommand::CurveTo(a, b, p) => PathCommand::CurveTo(at(a), at(b), at(p)),
                        PathCommand::Close => PathCommand::Close,
                    };
                }
            }
        }
    }

    fn bbox(&self, id: ElementId) -> BBox {
        let Some(e) = self.element(id) else { return BBox::default() };
        match &e.shape {
            Shape::Rect { bbox, .. } | Shape::Image { bbox, .. } => *bbox,
            Shape::Circle { cx, cy, r } => BBox::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            Shape::Text { x, y, content } => {
                let (w, h) = text_extent(content, &e.style);
                let left = match e.style.text_anchor.unwrap_or_default() {
                    TextAnchor::Start => *x,
                    TextAnchor::Middle => x - w / 2.0,
                    TextAnchor::End => x - w,
                };
                BBox::new(left, y - h / 2.0, w, h)
            }
            Shape::Path(cmds) => path_bbox(cmds),
        }
    }

    fn to_front(&mut self, id: ElementId) {
        if let Some(pos) = self.z_index(id) {
            self.order.remove(pos);
            self.order.push(id);
        }
    }
}

/// Scale a box about `origin`, keeping width and height non-negative.
fn scale_bbox(b: BBox, sx: f64, sy: f64, (ox, oy): (f64, f64)) -> BBox {
    let x0 = ox + (b.x - ox) * sx;
    let x1 = ox + (b.x + b.width - ox) * sx;
    let y0 = oy + (b.y - oy) * sy;
    let y1 = oy + (b.y + b.height - oy) * sy;
    BBox::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
}
