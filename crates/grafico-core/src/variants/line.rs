// File: crates/grafico-core/src/variants/line.rs
// Summary: Line chart: one stroked (optionally smoothed) path per series with optional markers.

use crate::error::Result;
use crate::layout::Layout;
use crate::options::{Markers, UserOptions};
use crate::scene::DEFAULT_FONT;
use crate::surface::{Style, Surface};

use super::{edge_to_edge_step, ChartVariant, DrawContext, Overlays, PlotPoint};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineGraph;

impl ChartVariant for LineGraph {
    fn name(&self) -> &'static str {
        "line"
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        Ok(UserOptions {
            start_at_zero: Some(true),
            stroke_width: Some(5.0),
            ..UserOptions::default()
        })
    }

    fn step_size(&self, layout: &Layout) -> Result<f64> {
        Ok(edge_to_edge_step(layout))
    }

    fn draw_point(
        &self,
        ctx: &DrawContext<'_>,
        point: &PlotPoint<'_>,
        surface: &mut dyn Surface,
        overlays: &mut Overlays,
    ) -> Result<()> {
        trace_point(ctx, point, surface);
        draw_marker(ctx, point, surface, overlays);
        Ok(())
    }
}

/// Extend the series path to `point`: move for the first point, then a
/// straight or curved segment from the previous coordinate.
pub(super) fn trace_point(ctx: &DrawContext<'_>, point: &PlotPoint<'_>, surface: &mut dyn Surface) {
    let at = point.at;
    let previous = point.index.checked_sub(1).and_then(|i| point.coords.get(i));
    match previous {
        None => surface.move_to(point.path, at.x, at.y),
        Some(prev) if ctx.options.curve_amount > 0.0 && prev.x != at.x => {
            let handle = (at.x - prev.x) * ctx.options.curve_amount;
            surface.curve_to(point.path, (prev.x, prev.y), at.x, at.y, handle);
        }
        Some(_) => surface.line_to(point.path, at.x, at.y),
    }
}

/// Circle or value text at a data point. Baseline points closing an area get none.
pub(super) fn draw_marker(
    ctx: &DrawContext<'_>,
    point: &PlotPoint<'_>,
    surface: &mut dyn Surface,
    overlays: &mut Overlays,
) {
    let Some(value) = point.value else { return };
    let opts = ctx.options;
    let at = point.at;
    let id = match opts.markers {
        Markers::None => return,
        Markers::Circle => surface.circle(
            at.x,
            at.y,
            opts.marker_size,
            Style::new().fill(point.colour).stroke("none"),
        ),
        Markers::Value => surface.text(
            at.x,
            at.y - opts.font_size - opts.marker_size,
            &value.to_string(),
            Style::new()
                .font(opts.font_size, DEFAULT_FONT)
                .fill(point.colour)
                .stroke("none"),
        ),
    };
    overlays.markers.push(id);
}
