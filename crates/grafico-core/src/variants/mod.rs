// File: crates/grafico-core/src/variants/mod.rs
// Summary: Chart-type hooks (defaults, step formula, point drawing) and the built-in chart types.
// Notes:
// - The required hooks have provided implementations that fail with
//   `NotImplemented`; a chart type that forgets one fails during construction.

use std::str::FromStr;

use crate::axis::ValueAxis;
use crate::error::{ChartError, Result};
use crate::geometry::Coordinate;
use crate::layout::Layout;
use crate::normaliser::{NormalisationResult, NormaliserOptions};
use crate::options::{Options, UserOptions};
use crate::scale::PlotScale;
use crate::series::DataSets;
use crate::surface::{ElementId, ElementSet, Surface};

mod area;
mod bar;
mod line;
mod parcoords;

pub use area::{AreaGraph, StackGraph};
pub use bar::BarGraph;
pub use line::LineGraph;
pub use parcoords::ParallelCoordinatesGraph;

/// Read-only state of a chart while it draws.
pub struct DrawContext<'a> {
    pub options: &'a Options,
    pub layout: &'a Layout,
    pub scale: &'a PlotScale,
    pub axis: &'a ValueAxis,
    pub normalised: &'a NormalisationResult,
    /// Values as plotted (stacked for stacked charts).
    pub plotted: &'a DataSets,
    /// Values as given.
    pub original: &'a DataSets,
}

/// Elements raised above the static chart once drawing is done.
#[derive(Clone, Debug, Default)]
pub struct Overlays {
    pub markers: ElementSet,
    pub hover: ElementSet,
    /// Highlight blocks a chart type draws over ranges of points; raised last.
    pub blocks: ElementSet,
}

impl Overlays {
    pub fn to_front(&self, surface: &mut dyn Surface) {
        self.markers.to_front(surface);
        self.hover.to_front(surface);
        self.blocks.to_front(surface);
    }
}

/// One point handed to [`ChartVariant::draw_point`].
pub struct PlotPoint<'a> {
    pub index: usize,
    /// Open path of the series.
    pub path: ElementId,
    pub at: Coordinate,
    /// Every coordinate of the series, for shapes that look around a point.
    pub coords: &'a [Coordinate],
    pub colour: &'a str,
    pub datalabel: Option<&'a str>,
    /// Value as given; `None` for baseline points added to close an area.
    pub value: Option<f64>,
    /// Position of the series among all series.
    pub series_index: usize,
}

/// Chart-type specific behaviour plugged into [`crate::Chart`].
pub trait ChartVariant {
    fn name(&self) -> &'static str;

    /// Options this chart type changes from the built-in defaults.
    fn chart_defaults(&self) -> Result<UserOptions> {
        Err(ChartError::not_implemented(self.name(), "chart_defaults"))
    }

    /// Horizontal distance between consecutive points.
    fn step_size(&self, _layout: &Layout) -> Result<f64> {
        Err(ChartError::not_implemented(self.name(), "step_size"))
    }

    fn draw_point(
        &self,
        _ctx: &DrawContext<'_>,
        _point: &PlotPoint<'_>,
        _surface: &mut dyn Surface,
        _overlays: &mut Overlays,
    ) -> Result<()> {
        Err(ChartError::not_implemented(self.name(), "draw_point"))
    }

    fn normaliser_options(&self) -> NormaliserOptions {
        NormaliserOptions::default()
    }

    /// Runs after layout, before the draw sequence.
    fn setup(&mut self, _ctx: &DrawContext<'_>, _surface: &mut dyn Surface) -> Result<()> {
        Ok(())
    }

    /// Custom value-to-pixel mapping for one series; `None` uses the shared scale.
    fn project(&self, _ctx: &DrawContext<'_>, _series_index: usize, _values: &[f64]) -> Option<Vec<Coordinate>> {
        None
    }

    /// x of the first category label, relative to the plot's left edge.
    fn label_offset(&self, layout: &Layout) -> f64 {
        layout.plot_padding
    }

    /// Shift of the vertical grid lines relative to the labels.
    fn grid_start_offset(&self) -> f64 {
        -1.0
    }
}

/// `(plot_width - 2 * plot_padding) / (n - 1)`: points spread edge to edge.
/// A single point has no neighbour to step to.
pub(crate) fn edge_to_edge_step(layout: &Layout) -> f64 {
    if layout.data_size < 2 {
        return 0.0;
    }
    (layout.graph_width - layout.plot_padding * 2.0) / layout.edge_to_edge_divider()
}

/// Chart types selectable by name, e.g. from a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Area,
    Stacked,
    Bar,
    ParallelCoordinates,
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "area" => Ok(Self::Area),
            "stack" | "stacked" => Ok(Self::Stacked),
            "bar" => Ok(Self::Bar),
            "parallel" | "parcoords" | "parallel_coordinates" => Ok(Self::ParallelCoordinates),
            "sparkline" | "sparkbar" | "horizontal_bar" | "horizontalbar" => {
                Err(ChartError::not_implemented(s, "chart type"))
            }
            other => Err(ChartError::invalid(format!("unknown chart type `{other}`"))),
        }
    }
}

/// Any built-in chart type, for callers choosing one at runtime.
#[derive(Clone, Debug)]
pub enum AnyGraph {
    Line(LineGraph),
    Area(AreaGraph),
    Stacked(StackGraph),
    Bar(BarGraph),
    ParallelCoordinates(ParallelCoordinatesGraph),
}

impl From<ChartKind> for AnyGraph {
    fn from(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Line => Self::Line(LineGraph),
            ChartKind::Area => Self::Area(AreaGraph),
            ChartKind::Stacked => Self::Stacked(StackGraph),
            ChartKind::Bar => Self::Bar(BarGraph::default()),
            ChartKind::ParallelCoordinates => Self::ParallelCoordinates(ParallelCoordinatesGraph::default()),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $g:ident => $e:expr) => {
        match $self {
            AnyGraph::Line($g) => $e,
            AnyGraph::Area($g) => $e,
            AnyGraph::Stacked($g) => $e,
            AnyGraph::Bar($g) => $e,
            AnyGraph::ParallelCoordinates($g) => $e,
        }
    };
}

impl ChartVariant for AnyGraph {
    fn name(&self) -> &'static str {
        delegate!(self, g => g.name())
    }

    fn chart_defaults(&self) -> Result<UserOptions> {
        delegate!(self, g => g.chart_defaults())
    }

    fn step_size(&self, layout: &Layout) -> Result<f64> {
        delegate!(self, g => g.step_size(layout))
    }

    fn draw_point(
        &self,
        ctx: &DrawContext<'_>,
        point: &PlotPoint<'_>,
        surface: &mut dyn Surface,
        overlays: &mut Overlays,
    ) -> Result<()> {
        delegate!(self, g => g.draw_point(ctx, point, surface, overlays))
    }

    fn normaliser_options(&self) -> NormaliserOptions {
        delegate!(self, g => g.normaliser_options())
    }

    fn setup(&mut self, ctx: &DrawContext<'_>, surface: &mut dyn Surface) -> Result<()> {
        delegate!(self, g => g.setup(ctx, surface))
    }

    fn project(&self, ctx: &DrawContext<'_>, series_index: usize, values: &[f64]) -> Option<Vec<Coordinate>> {
        delegate!(self, g => g.project(ctx, series_index, values))
    }

    fn label_offset(&self, layout: &Layout) -> f64 {
        delegate!(self, g => g.label_offset(layout))
    }

    fn grid_start_offset(&self) -> f64 {
        delegate!(self, g => g.grid_start_offset())
    }
}
