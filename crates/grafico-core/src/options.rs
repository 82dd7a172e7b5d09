// File: crates/grafico-core/src/options.rs
// Summary: Render options: partial user/chart-type options and the resolved set.
// Notes:
// - Priority, lowest first: built-in defaults, chart-type defaults, user options.
// - A single `colour` expands into a `colours` entry for every series and wins
//   over `colours` given alongside it.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{ChartError, Result};
use crate::host::SurfaceDescriptor;
use crate::series::DataSets;
use crate::theme;
use crate::watermark::{Watermark, WatermarkOrientation};

/// Point markers drawn by line-style charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MarkersRepr")]
pub enum Markers {
    #[default]
    None,
    Circle,
    /// The point's value as text above the point.
    Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarkersRepr {
    Flag(bool),
    Kind(MarkerKind),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum MarkerKind {
    Circle,
    Value,
}

impl From<MarkersRepr> for Markers {
    fn from(r: MarkersRepr) -> Self {
        match r {
            MarkersRepr::Flag(false) => Markers::None,
            MarkersRepr::Flag(true) | MarkersRepr::Kind(MarkerKind::Circle) => Markers::Circle,
            MarkersRepr::Kind(MarkerKind::Value) => Markers::Value,
        }
    }
}

/// Stroke settings for the mean line.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LineStyle {
    pub stroke: String,
    #[serde(default = "LineStyle::default_width")]
    pub stroke_width: f64,
}

impl LineStyle {
    fn default_width() -> f64 {
        2.0
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self { stroke: theme::MEANLINE.to_string(), stroke_width: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MeanLine {
    Enabled(bool),
    Styled(LineStyle),
}

impl MeanLine {
    /// `true` resolves to the default style.
    pub fn style(&self) -> Option<LineStyle> {
        match self {
            MeanLine::Enabled(false) => None,
            MeanLine::Enabled(true) => Some(LineStyle::default()),
            MeanLine::Styled(s) => Some(s.clone()),
        }
    }
}

fn labels_from_any<'de, D>(d: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(f64),
    }
    let raw: Option<Vec<Label>> = Option::deserialize(d)?;
    Ok(raw.map(|v| {
        v.into_iter()
            .map(|l| match l {
                Label::Text(s) => s,
                Label::Number(n) => n.to_string(),
            })
            .collect()
    }))
}

/// Partially specified options; every key is independent and optional.
/// Used for both user options and chart-type defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(deserialize_with = "labels_from_any")]
    pub labels: Option<Vec<String>>,
    pub grid: Option<bool>,
    pub plot_padding: Option<f64>,
    pub font_size: Option<f64>,
    pub show_horizontal_labels: Option<bool>,
    pub show_vertical_labels: Option<bool>,
    pub vertical_label_unit: Option<String>,
    pub colours: Option<IndexMap<String, String>>,
    pub colour: Option<String>,
    pub background_colour: Option<String>,
    pub label_colour: Option<String>,
    pub grid_colour: Option<String>,
    pub hover_text_colour: Option<String>,
    pub hover_colour: Option<String>,
    pub markers: Option<Markers>,
    pub marker_size: Option<f64>,
    pub meanline: Option<MeanLine>,
    pub padding_top: Option<f64>,
    pub draw_axis: Option<bool>,
    pub datalabels: Option<IndexMap<String, String>>,
    pub watermark: Option<Watermark>,
    pub watermark_orientation: Option<WatermarkOrientation>,
    pub hide_empty_label_grid: Option<bool>,
    pub left_padding: Option<f64>,
    pub stacked: Option<bool>,
    pub stacked_fill: Option<bool>,
    pub area: Option<bool>,
    pub area_opacity: Option<f64>,
    pub bar: Option<bool>,
    pub start_at_zero: Option<bool>,
    pub stroke_width: Option<f64>,
    pub curve_amount: Option<f64>,
}

impl UserOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ChartError::invalid(format!("options: {e}")))
    }
}

/// Fully resolved options for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub width: f64,
    pub height: f64,
    pub labels: Vec<String>,
    pub grid: bool,
    pub plot_padding: f64,
    pub font_size: f64,
    pub show_horizontal_labels: bool,
    pub show_vertical_labels: bool,
    pub vertical_label_unit: String,
    pub colours: IndexMap<String, String>,
    pub background_colour: String,
    pub label_colour: String,
    pub grid_colour: String,
    pub hover_text_colour: String,
    pub hover_colour: Option<String>,
    pub markers: Markers,
    pub marker_size: f64,
    pub meanline: Option<LineStyle>,
    pub padding_top: f64,
    pub draw_axis: bool,
    pub datalabels: IndexMap<String, String>,
    pub watermark: Option<Watermark>,
    pub watermark_orientation: WatermarkOrientation,
    pub hide_empty_label_grid: bool,
    pub left_padding: Option<f64>,
    pub stacked: bool,
    pub stacked_fill: bool,
    pub area: bool,
    pub area_opacity: Option<f64>,
    pub bar: bool,
    pub start_at_zero: bool,
    pub stroke_width: f64,
    pub curve_amount: f64,
}

macro_rules! take {
    ($dst:expr, $src:expr) => {
        if let Some(v) = &$src {
            $dst = v.clone();
        }
    };
    ($dst:expr, $src:expr, some) => {
        if let Some(v) = &$src {
            $dst = Some(v.clone());
        }
    };
}

impl Options {
    /// Merge built-in defaults, chart-type defaults and user options.
    /// Errors when no width/height can be resolved from any of them.
    pub fn resolve(
        surface: &SurfaceDescriptor,
        data: &DataSets,
        chart_defaults: &UserOptions,
        user: &UserOptions,
    ) -> Result<Self> {
        let width = user.width.or(chart_defaults.width).or(surface.width);
        let height = user.height.or(chart_defaults.height).or(surface.height);
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() => (w, h),
            _ => {
                return Err(ChartError::config(
                    "surface has no resolvable width/height; set them on the host or in options",
                ))
            }
        };

        let mut opts = Self::builtin(width, height, surface, data);
        opts.apply(chart_defaults, data);
        opts.apply(user, data);
        opts.validate()?;
        Ok(opts)
    }

    fn builtin(width: f64, height: f64, surface: &SurfaceDescriptor, data: &DataSets) -> Self {
        Self {
            width,
            height,
            labels: (1..=data.longest_len()).map(|i| i.to_string()).collect(),
            grid: true,
            plot_padding: 10.0,
            font_size: 10.0,
            show_horizontal_labels: true,
            show_vertical_labels: true,
            vertical_label_unit: String::new(),
            colours: data
                .iter()
                .map(|(i, name, _)| (name.to_string(), theme::series_colour(i)))
                .collect(),
            background_colour: surface.background.clone().unwrap_or_else(|| "none".to_string()),
            label_colour: theme::LABEL.to_string(),
            grid_colour: theme::GRID.to_string(),
            hover_text_colour: theme::HOVER_TEXT.to_string(),
            hover_colour: None,
            markers: Markers::None,
            marker_size: 5.0,
            meanline: None,
            padding_top: 20.0,
            draw_axis: true,
            datalabels: IndexMap::new(),
            watermark: None,
            watermark_orientation: WatermarkOrientation::default(),
            hide_empty_label_grid: false,
            left_padding: None,
            stacked: false,
            stacked_fill: false,
            area: false,
            area_opacity: None,
            bar: false,
            start_at_zero: true,
            stroke_width: 1.0,
            curve_amount: 0.0,
        }
    }

    fn apply(&mut self, o: &UserOptions, data: &DataSets) {
        take!(self.labels, o.labels);
        take!(self.grid, o.grid);
        take!(self.plot_padding, o.plot_padding);
        take!(self.font_size, o.font_size);
        take!(self.show_horizontal_labels, o.show_horizontal_labels);
        take!(self.show_vertical_labels, o.show_vertical_labels);
        take!(self.vertical_label_unit, o.vertical_label_unit);
        if let Some(colours) = &o.colours {
            self.colours.extend(colours.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(c) = &o.colour {
            for name in data.names() {
                self.colours.insert(name.to_string(), c.clone());
            }
        }
        take!(self.background_colour, o.background_colour);
        take!(self.label_colour, o.label_colour);
        take!(self.grid_colour, o.grid_colour);
        take!(self.hover_text_colour, o.hover_text_colour);
        take!(self.hover_colour, o.hover_colour, some);
        take!(self.markers, o.markers);
        take!(self.marker_size, o.marker_size);
        if let Some(m) = &o.meanline {
            self.meanline = m.style();
        }
        take!(self.padding_top, o.padding_top);
        take!(self.draw_axis, o.draw_axis);
        if let Some(d) = &o.datalabels {
            self.datalabels.extend(d.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        take!(self.watermark, o.watermark, some);
        take!(self.watermark_orientation, o.watermark_orientation);
        take!(self.hide_empty_label_grid, o.hide_empty_label_grid);
        take!(self.left_padding, o.left_padding, some);
        take!(self.stacked, o.stacked);
        take!(self.stacked_fill, o.stacked_fill);
        take!(self.area, o.area);
        take!(self.area_opacity, o.area_opacity, some);
        take!(self.bar, o.bar);
        take!(self.start_at_zero, o.start_at_zero);
        take!(self.stroke_width, o.stroke_width);
        take!(self.curve_amount, o.curve_amount);
    }

    fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ChartError::config(format!(
                "surface size {}x{} is not positive",
                self.width, self.height
            )));
        }
        if !(self.font_size > 0.0) {
            return Err(ChartError::invalid("font_size must be positive"));
        }
        let fixed = [
            ("background_colour", Some(&self.background_colour)),
            ("label_colour", Some(&self.label_colour)),
            ("grid_colour", Some(&self.grid_colour)),
            ("hover_text_colour", Some(&self.hover_text_colour)),
            ("hover_colour", self.hover_colour.as_ref()),
            ("meanline", self.meanline.as_ref().map(|m| &m.stroke)),
        ];
        let series = self.colours.iter().map(|(name, c)| (name.as_str(), Some(c)));
        for (key, colour) in fixed.into_iter().chain(series) {
            if let Some(c) = colour {
                theme::Rgba::parse(c).map_err(|e| ChartError::invalid(format!("{key}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Colour of the named series. Series without an entry fall back to the label colour.
    pub fn colour_of(&self, series: &str) -> &str {
        self.colours.get(series).map(String::as_str).unwrap_or(self.label_colour.as_str())
    }

    /// Area and stacked-fill charts paint their series as filled shapes.
    pub fn is_filled(&self) -> bool {
        self.stacked_fill || self.area
    }
}
