// File: crates/grafico-core/src/layout.rs
// Summary: Padding around the plot area and the plot area's pixel size.

use crate::error::{ChartError, Result};
use crate::geometry::BBox;
use crate::options::Options;
use crate::stats::round_to;
use crate::types::{Insets, LABEL_GAP, PADDING_BOTTOM, PADDING_RIGHT, UNIT_GAP};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub insets: Insets,
    pub graph_width: f64,
    pub graph_height: f64,
    /// Length of the longest series.
    pub data_size: usize,
    pub series_count: usize,
    pub plot_padding: f64,
    /// Horizontal distance between points; set from the chart type's formula.
    pub step: f64,
}

impl Layout {
    /// Reserve room for labels and derive the plot area.
    /// `flat` are all plotted values; they size the vertical labels.
    pub fn compute(opts: &Options, flat: &[f64], data_size: usize, series_count: usize) -> Result<Self> {
        let left = match opts.left_padding {
            Some(fixed) => fixed,
            None => {
                let unit = if opts.vertical_label_unit.is_empty() { 0.0 } else { UNIT_GAP };
                LABEL_GAP + label_width(opts, flat) + unit
            }
        };
        let insets = Insets::new(left, PADDING_RIGHT, opts.padding_top, PADDING_BOTTOM + opts.font_size);
        let graph_width = opts.width - insets.hsum();
        let graph_height = opts.height - insets.vsum();
        if !(graph_width > 0.0 && graph_height > 0.0) {
            return Err(ChartError::config(format!(
                "{}x{} surface leaves no plot area after padding ({}x{})",
                opts.width, opts.height, graph_width, graph_height
            )));
        }
        Ok(Self {
            insets,
            graph_width,
            graph_height,
            data_size,
            series_count,
            plot_padding: opts.plot_padding,
            step: 0.0,
        })
    }

    /// The rectangle the series are drawn in.
    pub fn plot_area(&self) -> BBox {
        BBox::new(self.insets.left, self.insets.top, self.graph_width, self.graph_height)
    }

    /// Divisor for "n points spread edge to edge" formulas; 1 for a single point.
    pub fn edge_to_edge_divider(&self) -> f64 {
        self.data_size.saturating_sub(1).max(1) as f64
    }
}

/// Estimated pixel width of the widest vertical label: the longest value
/// (rounded to 2 decimals) in characters times the font size. Labels of more
/// than two characters count one less, since digits are narrower than the font size.
fn label_width(opts: &Options, flat: &[f64]) -> f64 {
    if !opts.show_vertical_labels {
        return 0.0;
    }
    let longest = flat
        .iter()
        .map(|&v| round_to(v, 2).to_string().chars().count())
        .max()
        .unwrap_or(0);
    let chars = if longest > 2 { longest - 1 } else { longest };
    chars as f64 * opts.font_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SurfaceDescriptor;
    use crate::options::UserOptions;
    use crate::series::DataSets;

    fn opts(user: UserOptions) -> Options {
        let data = DataSets::from_input(vec![1.0, 2.0].into()).unwrap();
        Options::resolve(&SurfaceDescriptor::sized(300.0, 200.0), &data, &UserOptions::default(), &user).unwrap()
    }

    #[test]
    fn padding_reserves_label_room() {
        let l = Layout::compute(&opts(UserOptions::default()), &[1.0, 123.456], 2, 1).unwrap();
        // "123.46" is 6 chars -> 5 * 10px + 10px gap
        assert_eq!(l.insets.left, 60.0);
        assert_eq!(l.insets.right, 20.0);
        assert_eq!(l.insets.top, 20.0);
        assert_eq!(l.insets.bottom, 30.0);
        assert_eq!(l.graph_width, 220.0);
        assert_eq!(l.graph_height, 150.0);
    }

    #[test]
    fn explicit_left_padding_wins() {
        let l = Layout::compute(&opts(UserOptions { left_padding: Some(5.0), ..Default::default() }), &[1.0], 1, 1)
            .unwrap();
        assert_eq!(l.insets.left, 5.0);
    }

    #[test]
    fn no_room_is_a_configuration_error() {
        let o = opts(UserOptions { width: Some(20.0), ..Default::default() });
        assert!(matches!(Layout::compute(&o, &[1.0], 1, 1), Err(ChartError::Configuration(_))));
    }
}
