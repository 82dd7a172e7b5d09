// File: crates/grafico-core/src/variants/area.rs
// Summary: Area and stacked-area charts: line geometry closed onto the baseline and filled.

use crate::error::Result;
use crate::layout::Layout;
use crate::options::UserOptions;
use crate::surface::Surface;

use super::line::{draw_marker, trace_point};
use super::{edge_to_edge_step, ChartVariant, DrawContext, Overlays, PlotPoint};

/// Each series filled to the baseline, translucent so overlaps stay visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaGraph;

impl ChartVariant for AreaGraph {
    fn name(&self) -> &'static str {
        "area"
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        Ok(UserOptions { area: Some(true), ..UserOptions::default() })
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

/// Series stacked on top of each other. Markers show the values as given,
/// not the cumulative ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackGraph;

impl ChartVariant for StackGraph {
    fn name(&self) -> &'static str {
        "stacked"
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        Ok(UserOptions {
            stacked: Some(true),
            stacked_fill: Some(true),
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
