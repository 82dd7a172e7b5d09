// File: crates/grafico-render-skia/src/lib.rs
// Summary: Paints a grafico-core Scene onto a Skia CPU raster surface and encodes it as PNG.
// Notes:
// - Style semantics follow the SVG export: paths and shapes have no fill unless
//   one is set, text defaults to black, stroke width defaults to 1.
// - Elements with opacity 0 (hidden hover labels) are skipped.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use skia_safe as skia;
use thiserror::Error;

use grafico_core::{BBox, ChartError, Element, PathCommand, Rgba, Scene, Shape, Style, Surface};

mod text;

pub use text::TextShaper;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("encode PNG failed")]
    Encode,

    #[error(transparent)]
    Style(#[from] ChartError),

    #[error("write PNG: {0}")]
    Io(#[from] std::io::Error),
}

pub struct RenderOptions {
    /// Device pixels per scene pixel.
    pub scale: f32,
    /// Painted under the whole scene; the scene's own background only covers the plot area.
    pub background: Rgba,
    /// Base directory for relative image sources.
    pub asset_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: Rgba::rgb(255, 255, 255),
            asset_dir: None,
        }
    }
}

#[derive(Default)]
pub struct SkiaRenderer {
    opts: RenderOptions,
    text: TextShaper,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: RenderOptions) -> Self {
        Self { opts, text: TextShaper::new() }
    }

    /// Rasterise `scene` and return PNG bytes.
    pub fn render_png(&self, scene: &Scene) -> Result<Vec<u8>, RenderError> {
        let (w, h) = scene.size();
        let scale = self.opts.scale.max(0.01);
        let width = (w as f32 * scale).ceil() as i32;
        let height = (h as f32 * scale).ceil() as i32;

        // Create raster surface
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(RenderError::Surface { width, height })?;
        let canvas = surface.canvas();
        canvas.clear(to_color(self.opts.background, 1.0));
        canvas.scale((scale, scale));

        let mut painted = 0usize;
        for e in scene.elements() {
            if self.paint_element(canvas, e)? {
                painted += 1;
            }
        }
        debug!("skia: painted {painted} elements on {width}x{height}");

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file at `path`, creating parent directories.
    pub fn write_png(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let bytes = self.render_png(scene)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Returns whether anything was drawn.
    fn paint_element(&self, canvas: &skia::Canvas, e: &Element) -> Result<bool, RenderError> {
        let style = &e.style;
        let opacity = style.opacity.unwrap_or(1.0) as f32;
        if opacity <= 0.0 {
            return Ok(false);
        }
        match &e.shape {
            Shape::Path(cmds) => {
                let path = to_path(cmds);
                fill_and_stroke(canvas, style, opacity, |c, p| {
                    c.draw_path(&path, p);
                })?;
            }
            Shape::Rect { bbox, radius } => {
                let rect = to_rect(bbox);
                let r = *radius as f32;
                fill_and_stroke(canvas, style, opacity, |c, p| {
                    if r > 0.0 {
                        c.draw_rrect(skia::RRect::new_rect_xy(rect, r, r), p);
                    } else {
                        c.draw_rect(rect, p);
                    }
                })?;
            }
            Shape::Circle { cx, cy, r } => {
                let (cx, cy, r) = (*cx as f32, *cy as f32, *r as f32);
                fill_and_stroke(canvas, style, opacity, |c, p| {
                    c.draw_circle((cx, cy), r, p);
                })?;
            }
            Shape::Text { x, y, content } => {
                let Some(color) = colour(Some(style.fill.as_deref().unwrap_or("#000")), opacity)? else {
                    return Ok(false);
                };
                self.text.draw(
                    canvas,
                    content,
                    *x as f32,
                    *y as f32,
                    style.text_anchor.unwrap_or_default(),
                    style.font_family.as_deref().unwrap_or(grafico_core::scene::DEFAULT_FONT),
                    style.font_size.unwrap_or(10.0) as f32,
                    color,
                );
            }
            Shape::Image { src, bbox } => return Ok(self.draw_image(canvas, src, bbox, opacity)),
        }
        Ok(true)
    }

    /// Images that cannot be read or decoded are skipped with a warning.
    fn draw_image(&self, canvas: &skia::Canvas, src: &str, bbox: &BBox, opacity: f32) -> bool {
        let path = match &self.opts.asset_dir {
            Some(dir) if Path::new(src).is_relative() => dir.join(src),
            _ => PathBuf::from(src),
        };
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                warn!("skia: image {} not drawn: {e}", path.display());
                return false;
            }
        };
        let Some(image) = skia::images::deferred_from_encoded_data(skia::Data::new_copy(&bytes), None) else {
            warn!("skia: image {} could not be decoded", path.display());
            return false;
        };
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_alpha_f(opacity);
        canvas.draw_image_rect(&image, None, to_rect(bbox), &paint);
        true
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_color(c: Rgba, alpha: f32) -> skia::Color {
    let a = (c.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

/// Paint colour for a style attribute; `None` when unset or fully transparent.
fn colour(spec: Option<&str>, alpha: f32) -> Result<Option<skia::Color>, RenderError> {
    let Some(spec) = spec else { return Ok(None) };
    let rgba = Rgba::parse(spec)?;
    if rgba.a == 0 || alpha <= 0.0 {
        return Ok(None);
    }
    Ok(Some(to_color(rgba, alpha)))
}

fn fill_and_stroke(
    canvas: &skia::Canvas,
    style: &Style,
    opacity: f32,
    draw: impl Fn(&skia::Canvas, &skia::Paint),
) -> Result<(), RenderError> {
    let fill_alpha = opacity * style.fill_opacity.unwrap_or(1.0) as f32;
    if let Some(fill) = colour(style.fill.as_deref(), fill_alpha)? {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(fill);
        draw(canvas, &paint);
    }

    let width = style.stroke_width.unwrap_or(1.0) as f32;
    if width > 0.0 {
        if let Some(stroke) = colour(style.stroke.as_deref(), opacity)? {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::paint::Style::Stroke);
            paint.set_stroke_width(width);
            paint.set_color(stroke);
            draw(canvas, &paint);
        }
    }
    Ok(())
}

fn to_rect(b: &BBox) -> skia::Rect {
    skia::Rect::from_xywh(b.x as f32, b.y as f32, b.width as f32, b.height as f32)
}

fn to_path(cmds: &[PathCommand]) -> skia::Path {
    let pt = |(x, y): (f64, f64)| skia::Point::new(x as f32, y as f32);
    let mut path = skia::Path::new();
    for c in cmds {
        match *c {
            PathCommand::MoveTo(x, y) => {
                path.move_to(pt((x, y)));
            }
            PathCommand::LineTo(x, y) => {
                path.line_to(pt((x, y)));
            }
            PathCommand::CurveTo(c1, c2, to) => {
                path.cubic_to(pt(c1), pt(c2), pt(to));
            }
            PathCommand::Close => {
                path.close();
            }
        }
    }
    path
}
