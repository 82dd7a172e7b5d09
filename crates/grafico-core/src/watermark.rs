// File: crates/grafico-core/src/watermark.rs
// Summary: Watermark image descriptor, dimension probing and placement in the plot area.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::geometry::BBox;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkOrientation {
    /// Centred in the plot area.
    Middle,
    /// Against the bottom-right corner of the plot area, 2px inset.
    #[default]
    #[serde(alias = "bottom_right")]
    BottomRight,
}

/// Image drawn faintly behind the series.
/// Without known dimensions the series draw waits for
/// [`crate::Chart::watermark_loaded`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "WatermarkRepr")]
pub struct Watermark {
    pub src: String,
    pub size: Option<(f64, f64)>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WatermarkRepr {
    Src(String),
    Descriptor {
        src: String,
        width: Option<f64>,
        height: Option<f64>,
    },
}

impl From<WatermarkRepr> for Watermark {
    fn from(r: WatermarkRepr) -> Self {
        match r {
            WatermarkRepr::Src(src) => Self { src, size: None },
            WatermarkRepr::Descriptor { src, width, height } => Self { src, size: width.zip(height) },
        }
    }
}

impl Watermark {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into(), size: None }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Read the image header at `path` to learn its pixel dimensions.
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (w, h) = image::image_dimensions(path)
            .map_err(|e| ChartError::invalid(format!("watermark {}: {e}", path.display())))?;
        Ok(Self::new(path.display().to_string()).with_size(w as f64, h as f64))
    }
}

/// Where an image of `size` goes inside `plot`.
pub fn placement(plot: BBox, size: (f64, f64), orientation: WatermarkOrientation) -> BBox {
    let (w, h) = size;
    let (x, y) = match orientation {
        WatermarkOrientation::Middle => (plot.x + (plot.width - w) / 2.0, plot.y + (plot.height - h) / 2.0),
        WatermarkOrientation::BottomRight => (plot.x + plot.width - w - 2.0, plot.y + plot.height - h - 2.0),
    };
    BBox::new(x, y, w, h)
}
