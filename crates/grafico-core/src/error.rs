// File: crates/grafico-core/src/error.rs
// Summary: Error type shared by normalisation, layout and chart construction.

use thiserror::Error;

/// Everything that can make a chart construction fail.
/// A chart either renders completely or construction returns one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// Data or option values that cannot be charted (empty series, NaN, bad colour...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Sizing information is missing or leaves no room for a plot area.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A chart variant did not supply one of its hooks.
    #[error("chart type `{chart}` does not implement `{hook}`")]
    NotImplemented { chart: String, hook: &'static str },
}

impl ChartError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_implemented(chart: impl Into<String>, hook: &'static str) -> Self {
        Self::NotImplemented { chart: chart.into(), hook }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
