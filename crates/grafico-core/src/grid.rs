// File: crates/grafico-core/src/grid.rs
// Summary: Grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Snap to the middle of a pixel so 1px lines stay sharp.
#[inline]
pub fn crisp(v: f64) -> f64 {
    v.trunc() + 0.5
}

/// y of each horizontal grid line, bottom first: one per value label plus the origin.
pub fn horizontal_lines(top: f64, bottom: f64, label_count: usize) -> Vec<f64> {
    linspace(bottom, top, label_count + 1)
}

/// x of each vertical grid line, one per category label; empty labels are
/// skipped when `hide_empty` is set.
pub fn vertical_lines(start_x: f64, step: f64, labels: &[String], hide_empty: bool) -> Vec<f64> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| !hide_empty || !l.is_empty())
        .map(|(i, _)| start_x + i as f64 * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_includes_both_edges() {
        assert_eq!(horizontal_lines(20.0, 170.0, 3), vec![170.0, 120.0, 70.0, 20.0]);
    }

    #[test]
    fn hides_empty_labels() {
        let labels = vec!["a".to_string(), String::new(), "c".to_string()];
        assert_eq!(vertical_lines(10.0, 5.0, &labels, true), vec![10.0, 20.0]);
        assert_eq!(vertical_lines(10.0, 5.0, &labels, false).len(), 3);
    }
}
