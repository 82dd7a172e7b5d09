// File: crates/grafico-render-skia/src/text.rs
// Summary: Text shaping with Skia textlayout; places scene text by anchor and vertical centre.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use grafico_core::TextAnchor;

/// Families tried after the one a text element asks for.
const FALLBACK_FAMILIES: [&str; 5] = ["Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(family: &str, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        let mut families = vec![family];
        families.extend(FALLBACK_FAMILIES.iter().copied().filter(|f| *f != family));
        ts.set_font_families(&families);
        ts
    }

    pub fn layout(&self, text: &str, family: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(family, size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` anchored horizontally at `x` and centred vertically on `y`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        anchor: TextAnchor,
        family: &str,
        size: f32,
        color: skia::Color,
    ) {
        let mut p = self.layout(text, family, size, color);
        let width = p.longest_line();
        let left = match anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - width / 2.0,
            TextAnchor::End => x - width,
        };
        // Paragraph draws from its top-left corner
        let top = y - p.height() / 2.0;
        p.paint(canvas, (left, top));
    }
}
