// File: crates/grafico-core/src/axis.rs
// Summary: Value axis: how many labels are needed and their values.

use crate::normaliser::NormalisationResult;
use crate::stats::{round_half_up, round_to};

/// Labels of the vertical (value) axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueAxis {
    /// Number of label steps above the origin. Never zero.
    pub label_count: usize,
    /// `start + k * step` for `k` in `1..=label_count`, rounded to 3 decimals.
    pub labels: Vec<f64>,
    /// Last label; the value at the top of the plot when the origin is 0.
    pub top_value: f64,
}

impl ValueAxis {
    pub fn from_normalised(n: &NormalisationResult) -> Self {
        let label_count = label_count(n);
        let labels = value_labels(n.start_value, n.step, label_count);
        let top_value = labels.last().copied().unwrap_or(n.start_value + n.step);
        Self { label_count, labels, top_value }
    }

    /// Labels as displayed, with an optional unit suffix.
    pub fn formatted(&self, unit: &str) -> Vec<String> {
        self.labels
            .iter()
            .map(|v| if unit.is_empty() { v.to_string() } else { format!("{v} {unit}") })
            .collect()
    }
}

/// Hard ceiling on value labels; a normalised range never gets near it.
pub const MAX_LABELS: usize = 1_000;

/// `round(range / step)`, plus one when the top label would still fall short
/// of the maximum. At least one so the plot height can be divided by it.
pub fn label_count(n: &NormalisationResult) -> usize {
    let mut count = round_half_up(n.range / n.step).max(0.0) as usize;
    if n.min + (count as f64) * n.step < n.max {
        count = count.saturating_add(1);
    }
    count.clamp(1, MAX_LABELS)
}

/// Accumulate `step` from `start`, rounding every label to 3 decimals so
/// floating point drift does not show up in the text.
pub fn value_labels(start: f64, step: f64, count: usize) -> Vec<f64> {
    let mut label = start;
    (0..count)
        .map(|_| {
            label = round_to(label + step, 3);
            label
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normaliser::{normalise, NormaliserOptions};

    #[test]
    fn labels_cover_the_data() {
        let n = normalise(&[1.0, 2.0, 3.0, 4.0, 5.0], NormaliserOptions::default()).unwrap();
        let axis = ValueAxis::from_normalised(&n);
        assert_eq!(axis.label_count, 5);
        assert_eq!(axis.labels, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(axis.top_value, 5.0);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        assert_eq!(value_labels(0.0, 0.1, 3), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn unit_suffix() {
        let n = normalise(&[0.0, 2.0], NormaliserOptions::default()).unwrap();
        let axis = ValueAxis::from_normalised(&n);
        // range 2 in 0.1 steps is too dense, so the step triples
        assert_eq!(axis.formatted("kg")[0], "0.3 kg");
        assert_eq!(axis.formatted("")[1], "0.6");
    }

    #[test]
    fn unbounded_ranges_are_capped() {
        let n = NormalisationResult {
            min: 0.0,
            max: f64::INFINITY,
            standard_deviation: 0.0,
            step: 3.0,
            start_value: 0.0,
            range: f64::INFINITY,
            zero_value: 0.0,
        };
        assert_eq!(label_count(&n), MAX_LABELS);
    }
}
