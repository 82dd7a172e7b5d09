// File: crates/grafico-core/src/variants/bar.rs
// Summary: Grouped bar chart; each series' bars are sub-paths of one filled path.

use crate::error::Result;
use crate::geometry::Coordinate;
use crate::layout::Layout;
use crate::normaliser::NormaliserOptions;
use crate::options::UserOptions;
use crate::surface::{Style, Surface};

use super::line::draw_marker;
use super::{ChartVariant, DrawContext, Overlays, PlotPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGraph {
    /// Gap between neighbouring bar groups, in pixels.
    pub bar_padding: f64,
}

impl Default for BarGraph {
    fn default() -> Self {
        Self { bar_padding: 4.0 }
    }
}

impl BarGraph {
    pub fn with_padding(bar_padding: f64) -> Self {
        Self { bar_padding }
    }

    /// Width of one bar when `series_count` bars share a category.
    pub fn bar_width(&self, layout: &Layout) -> f64 {
        ((layout.step - self.bar_padding) / layout.series_count.max(1) as f64).max(0.0)
    }
}

impl ChartVariant for BarGraph {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        Ok(UserOptions {
            bar: Some(true),
            plot_padding: Some(0.0),
            ..UserOptions::default()
        })
    }

    fn normaliser_options(&self) -> NormaliserOptions {
        NormaliserOptions { start_value: Some(0.0) }
    }

    fn step_size(&self, layout: &Layout) -> Result<f64> {
        Ok(layout.graph_width / layout.data_size.max(1) as f64)
    }

    fn label_offset(&self, layout: &Layout) -> f64 {
        layout.plot_padding + layout.step / 2.0
    }

    fn draw_point(
        &self,
        ctx: &DrawContext<'_>,
        point: &PlotPoint<'_>,
        surface: &mut dyn Surface,
        overlays: &mut Overlays,
    ) -> Result<()> {
        let width = self.bar_width(ctx.layout);
        let left = point.at.x + self.bar_padding / 2.0 + point.series_index as f64 * width;
        let zero = ctx.scale.zero_line();
        let top = point.at.y;

        if point.index == 0 {
            surface.set_style(point.path, &Style::new().fill(point.colour));
        }
        surface.move_to(point.path, left, zero);
        surface.line_to(point.path, left, top);
        surface.line_to(point.path, left + width, top);
        surface.line_to(point.path, left + width, zero);
        surface.close_path(point.path);

        let centre = PlotPoint { at: Coordinate::new(left + width / 2.0, top), ..*point };
        draw_marker(ctx, &centre, surface, overlays);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Insets;

    #[test]
    fn bars_share_the_category_width() {
        let layout = Layout {
            insets: Insets::new(0.0, 0.0, 0.0, 0.0),
            graph_width: 200.0,
            graph_height: 100.0,
            data_size: 4,
            series_count: 2,
            plot_padding: 0.0,
            step: 50.0,
        };
        let bar = BarGraph::default();
        assert_eq!(bar.step_size(&layout).unwrap(), 50.0);
        assert_eq!(bar.bar_width(&layout), 23.0);
        assert_eq!(bar.label_offset(&layout), 25.0);
    }
}
