// File: crates/grafico-core/src/lib.rs
// Summary: Core library entry point; exports the public API for chart construction and scene export.

pub mod axis;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod hover;
pub mod layout;
pub mod normaliser;
pub mod options;
pub mod scale;
pub mod scene;
pub mod series;
pub mod stats;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod types;
pub mod variants;
pub mod watermark;

pub use axis::ValueAxis;
pub use chart::Chart;
pub use error::{ChartError, Result};
pub use geometry::{BBox, Coordinate};
pub use host::{HostElement, MouseEvent, StyleLookup, SurfaceDescriptor};
pub use hover::{HoverLabel, PointerEvent};
pub use layout::Layout;
pub use normaliser::{normalise, NormalisationResult, NormaliserOptions};
pub use options::{LineStyle, Markers, MeanLine, Options, UserOptions};
pub use scale::PlotScale;
pub use scene::{Element, Scene, Shape};
pub use series::{DataInput, DataSets};
pub use surface::{ElementId, ElementSet, PathCommand, Style, Surface, TextAnchor};
pub use theme::Rgba;
pub use variants::{
    AnyGraph, AreaGraph, BarGraph, ChartKind, ChartVariant, LineGraph, ParallelCoordinatesGraph, StackGraph,
};
pub use watermark::{Watermark, WatermarkOrientation};
