// File: crates/grafico-core/src/svg.rs
// Summary: Serialises a Scene into a standalone SVG document.

use std::fmt::Write as _;
use std::path::Path;

use crate::scene::{Element, Scene, Shape, DEFAULT_FONT};
use crate::surface::{PathCommand, Style, Surface};

/// Escape text for XML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// SVG path data for `cmds`.
pub fn path_data(cmds: &[PathCommand]) -> String {
    let mut d = String::new();
    for c in cmds {
        let _ = match *c {
            PathCommand::MoveTo(x, y) => write!(d, "M{x} {y}"),
            PathCommand::LineTo(x, y) => write!(d, "L{x} {y}"),
            PathCommand::CurveTo((x1, y1), (x2, y2), (x, y)) => write!(d, "C{x1} {y1} {x2} {y2} {x} {y}"),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

fn style_attrs(out: &mut String, style: &Style, default_fill: &str) {
    let fill = style.fill.as_deref().unwrap_or(default_fill);
    let _ = write!(out, r#" fill="{}""#, escape(fill));
    if let Some(stroke) = &style.stroke {
        let _ = write!(out, r#" stroke="{}""#, escape(stroke));
    }
    if let Some(w) = style.stroke_width {
        let _ = write!(out, r#" stroke-width="{w}""#);
    }
    if let Some(o) = style.opacity {
        let _ = write!(out, r#" opacity="{o}""#);
    }
    if let Some(o) = style.fill_opacity {
        let _ = write!(out, r#" fill-opacity="{o}""#);
    }
}

fn write_element(out: &mut String, e: &Element) {
    let id = e.id.0;
    match &e.shape {
        Shape::Path(cmds) => {
            let _ = write!(out, r#"<path id="e{id}" d="{}""#, path_data(cmds));
            style_attrs(out, &e.style, "none");
            out.push_str("/>");
        }
        Shape::Rect { bbox, radius } => {
            let _ = write!(
                out,
                r#"<rect id="e{id}" x="{}" y="{}" width="{}" height="{}""#,
                bbox.x, bbox.y, bbox.width, bbox.height
            );
            if *radius > 0.0 {
                let _ = write!(out, r#" rx="{radius}" ry="{radius}""#);
            }
            style_attrs(out, &e.style, "none");
            out.push_str("/>");
        }
        Shape::Circle { cx, cy, r } => {
            let _ = write!(out, r#"<circle id="e{id}" cx="{cx}" cy="{cy}" r="{r}""#);
            style_attrs(out, &e.style, "none");
            out.push_str("/>");
        }
        Shape::Text { x, y, content } => {
            let size = e.style.font_size.unwrap_or(10.0);
            let family = e.style.font_family.as_deref().unwrap_or(DEFAULT_FONT);
            let anchor = e.style.text_anchor.unwrap_or_default().as_str();
            let _ = write!(
                out,
                r#"<text id="e{id}" x="{x}" y="{y}" font-size="{size}" font-family="{}" text-anchor="{anchor}" dominant-baseline="central""#,
                escape(family)
            );
            style_attrs(out, &e.style, "#000");
            let _ = write!(out, ">{}</text>", escape(content));
        }
        Shape::Image { src, bbox } => {
            let _ = write!(
                out,
                r#"<image id="e{id}" href="{}" x="{}" y="{}" width="{}" height="{}""#,
                escape(src),
                bbox.x,
                bbox.y,
                bbox.width,
                bbox.height
            );
            if let Some(o) = e.style.opacity {
                let _ = write!(out, r#" opacity="{o}""#);
            }
            out.push_str("/>");
        }
    }
    out.push('\n');
}

impl Scene {
    /// Standalone SVG document, elements in paint order.
    pub fn to_svg(&self) -> String {
        let (w, h) = self.size();
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        for e in self.elements() {
            write_element(&mut out, e);
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_svg(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    #[test]
    fn serialises_elements_in_order() {
        let mut s = Scene::new(100.0, 50.0);
        let p = s.path(Style::new().stroke("#f00"));
        s.move_to(p, 0.0, 0.0);
        s.line_to(p, 10.5, 20.0);
        s.text(5.0, 5.0, "a<b", Style::new());
        s.rect(BBox::new(1.0, 2.0, 3.0, 4.0), 6.0, Style::new().fill("#fff"));
        let svg = s.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"d="M0 0L10.5 20""#));
        assert!(svg.contains(">a&lt;b</text>"));
        assert!(svg.contains(r#"rx="6""#));
        let path_at = svg.find("<path").unwrap();
        let rect_at = svg.find("<rect").unwrap();
        assert!(path_at < rect_at);
    }
}
