// File: crates/grafico-core/src/normaliser.rs
// Summary: Chooses the displayed value range: origin, "nice" step and zero offset.

use log::debug;

use crate::error::{ChartError, Result};
use crate::stats::{self, round_half_up};

/// Labels are considered too dense above this many steps; the step triples.
const MAX_STEPS: f64 = 15.0;
/// Origins are rounded to multiples of this.
const ORIGIN_GRANULARITY: f64 = 10.0;
/// Below this spread the origin is used as-is.
const ROUNDING_MIN_DEVIATION: f64 = 0.1;
/// Upper bound on origin rounding passes before falling back to `floor(min)`.
const MAX_ORIGIN_PASSES: usize = 1_000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormaliserOptions {
    /// Preferred origin; honoured only when the data minimum is non-negative.
    pub start_value: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalisationResult {
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
    /// Distance between value labels. Always positive and finite.
    pub step: f64,
    /// Origin of the value axis.
    pub start_value: f64,
    /// `max - start_value`.
    pub range: f64,
    /// Position of value 0 in steps from the origin.
    pub zero_value: f64,
}

/// `10^(round(log10(range)) - 1)`; one order of magnitude below the range.
/// An empty range (all values equal) gets a unit step.
pub fn label_step(range: f64) -> f64 {
    if !(range > 0.0) || !range.is_finite() {
        return 1.0;
    }
    10f64.powf(round_half_up(range.log10()) - 1.0)
}

/// Compute the display range for a flat sequence of values.
/// Errors when fewer than two values are given, any value is not finite, or
/// the spread of the values does not fit in an `f64`.
pub fn normalise(values: &[f64], options: NormaliserOptions) -> Result<NormalisationResult> {
    let min = stats::min(values)?;
    let max = stats::max(values)?;
    let standard_deviation = stats::standard_deviation(values)?;
    if !(max - min).is_finite() || !standard_deviation.is_finite() {
        return Err(ChartError::invalid(format!("value spread {min}..{max} is too large to chart")));
    }

    let initial_step = label_step(max - min);
    let start_value = calculate_start(min, standard_deviation, initial_step, options.start_value);

    let range = max - start_value;
    if !range.is_finite() {
        return Err(ChartError::invalid(format!("range from origin {start_value} to {max} is too large to chart")));
    }
    let mut step = label_step(range);
    if range / step > MAX_STEPS {
        step *= 3.0;
    }
    let zero_value = (0.0 - start_value) / step;

    let result = NormalisationResult {
        min,
        max,
        standard_deviation,
        step,
        start_value,
        range,
        zero_value,
    };
    debug!("normalised {} values: {:?}", values.len(), result);
    Ok(result)
}

fn calculate_start(min: f64, deviation: f64, step: f64, forced: Option<f64>) -> f64 {
    let candidate = match forced {
        Some(v) if min >= 0.0 => v,
        _ => min,
    };
    let start = round_origin(candidate, min, deviation, step);
    // never start above the data when none of it is negative
    if min >= 0.0 && start > min {
        return 0.0;
    }
    start
}

/// Round `value` to a multiple of ten that does not exceed `min`, lowering the
/// candidate one `step` at a time.
///
/// Every pass lowers the candidate by `step > 0`; once it is more than half a
/// granule below `min` its rounding is `<= min`. That takes at most
/// `ceil((value - min + granule / 2) / step) + 1` passes, capped at
/// `MAX_ORIGIN_PASSES` for far-off forced origins.
fn round_origin(value: f64, min: f64, deviation: f64, step: f64) -> f64 {
    if !(deviation > ROUNDING_MIN_DEVIATION) {
        return value;
    }
    let round = |v: f64| round_half_up(v / ORIGIN_GRANULARITY) * ORIGIN_GRANULARITY;

    let headroom = (value - min).max(0.0) + ORIGIN_GRANULARITY / 2.0;
    let max_passes = ((headroom / step).ceil() as usize).saturating_add(1).min(MAX_ORIGIN_PASSES);

    let mut candidate = value;
    for _ in 0..=max_passes {
        let rounded = round(candidate);
        if rounded <= min {
            return rounded;
        }
        candidate -= step;
    }
    (min / ORIGIN_GRANULARITY).floor() * ORIGIN_GRANULARITY
}
