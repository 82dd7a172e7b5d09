// File: crates/grafico-core/src/variants/parcoords.rs
// Summary: Parallel coordinates: every index is its own vertical axis scaled to that index's range.
// Notes:
// - Axis ranges are computed in `setup` over all series; an axis whose values
//   are all equal maps them to its middle.

use log::debug;

use crate::error::Result;
use crate::geometry::Coordinate;
use crate::grid::crisp;
use crate::layout::Layout;
use crate::options::UserOptions;
use crate::scene::DEFAULT_FONT;
use crate::stats::round_to;
use crate::surface::{Style, Surface, TextAnchor};

use super::line::{draw_marker, trace_point};
use super::{edge_to_edge_step, ChartVariant, DrawContext, Overlays, PlotPoint};

/// Closed value range of one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Position of `value` on the axis, 0 at the bottom and 1 at the top.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (value - self.min) / span
        } else {
            0.5
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallelCoordinatesGraph {
    axes: Vec<AxisRange>,
}

impl ParallelCoordinatesGraph {
    pub fn axes(&self) -> &[AxisRange] {
        &self.axes
    }
}

/// Min and max at every index over all series; shorter series skip the indices they lack.
pub fn axis_ranges(ctx: &DrawContext<'_>) -> Vec<AxisRange> {
    (0..ctx.layout.data_size)
        .filter_map(|i| {
            let column = ctx.plotted.iter().filter_map(|(_, _, values)| values.get(i).copied());
            column.fold(None, |acc: Option<AxisRange>, v| {
                Some(match acc {
                    None => AxisRange { min: v, max: v },
                    Some(r) => AxisRange { min: r.min.min(v), max: r.max.max(v) },
                })
            })
        })
        .collect()
}

impl ChartVariant for ParallelCoordinatesGraph {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        Ok(UserOptions {
            grid: Some(false),
            show_vertical_labels: Some(false),
            stroke_width: Some(2.0),
            ..UserOptions::default()
        })
    }

    fn step_size(&self, layout: &Layout) -> Result<f64> {
        Ok(edge_to_edge_step(layout))
    }

    fn setup(&mut self, ctx: &DrawContext<'_>, surface: &mut dyn Surface) -> Result<()> {
        self.axes = axis_ranges(ctx);
        debug!("parallel coordinates: {} axes", self.axes.len());

        let opts = ctx.options;
        let top = ctx.layout.insets.top;
        let bottom = ctx.scale.baseline;
        let lines = surface.path(Style::new().stroke(opts.label_colour.clone()));
        let text = Style::new()
            .font(opts.font_size, DEFAULT_FONT)
            .fill(opts.label_colour.clone())
            .stroke("none");

        for (i, range) in self.axes.iter().enumerate() {
            let x = crisp(ctx.scale.x(i));
            surface.move_to(lines, x, top);
            surface.line_to(lines, x, bottom);

            surface.text(x, top - opts.font_size * 0.8, &round_to(range.max, 2).to_string(), text.clone());
            surface.text(
                x + 3.0,
                bottom - opts.font_size / 2.0 - 1.0,
                &round_to(range.min, 2).to_string(),
                text.clone().anchor(TextAnchor::Start),
            );
        }
        Ok(())
    }

    fn project(&self, ctx: &DrawContext<'_>, _series_index: usize, values: &[f64]) -> Option<Vec<Coordinate>> {
        if self.axes.is_empty() {
            return None;
        }
        let scale = ctx.scale;
        let coords = values
            .iter()
            .zip(&self.axes)
            .enumerate()
            .map(|(i, (&v, range))| Coordinate::new(scale.x(i), scale.baseline - range.fraction(v) * scale.plot_height))
            .collect();
        Some(coords)
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
