// File: crates/grafico-core/src/series.rs
// Summary: Named, index-aligned data series; shape normalisation, flattening and stacking.
// Notes:
// - Stacking never mutates the original values. `DataSets::stacked` returns a
//   new set and callers keep the original as the snapshot used for labels.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ChartError, Result};

/// Name given to a series supplied as a bare sequence.
pub const DEFAULT_SERIES: &str = "one";

/// Data as accepted by chart construction: one bare sequence or named series.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataInput {
    Single(Vec<f64>),
    Named(IndexMap<String, Vec<f64>>),
}

impl From<Vec<f64>> for DataInput {
    fn from(v: Vec<f64>) -> Self {
        Self::Single(v)
    }
}

impl From<IndexMap<String, Vec<f64>>> for DataInput {
    fn from(m: IndexMap<String, Vec<f64>>) -> Self {
        Self::Named(m)
    }
}

impl<const N: usize> From<[(&str, Vec<f64>); N]> for DataInput {
    fn from(pairs: [(&str, Vec<f64>); N]) -> Self {
        Self::Named(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Ordered mapping from series name to its values.
/// Position in the map is the series' index among all series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSets {
    sets: IndexMap<String, Vec<f64>>,
}

impl DataSets {
    /// Normalise input shape. Rejects an input without any series.
    pub fn from_input(input: DataInput) -> Result<Self> {
        let sets = match input {
            DataInput::Single(values) => {
                let mut m = IndexMap::new();
                m.insert(DEFAULT_SERIES.to_string(), values);
                m
            }
            DataInput::Named(m) => m,
        };
        if sets.is_empty() {
            return Err(ChartError::invalid("no data series given"));
        }
        Ok(Self { sets })
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    /// `(position, name, values)` in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &str, &[f64])> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, (k, v))| (i, k.as_str(), v.as_slice()))
    }

    /// All values of all series, series after series.
    pub fn flatten(&self) -> Vec<f64> {
        self.sets.values().flatten().copied().collect()
    }

    /// Length of the longest series; this is the plotted width in points.
    pub fn longest_len(&self) -> usize {
        self.sets.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Cumulative sums across series at each index: series `k` holds the sum of
    /// series `0..=k`. Indices missing from shorter series contribute nothing,
    /// and each stacked series keeps its own length.
    pub fn stacked(&self) -> Self {
        let mut running = vec![0.0; self.longest_len()];
        let sets = self
            .sets
            .iter()
            .map(|(name, values)| {
                let stacked = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        running[i] += v;
                        running[i]
                    })
                    .collect();
                (name.clone(), stacked)
            })
            .collect();
        Self { sets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_sequence_is_series_one() {
        let d = DataSets::from_input(vec![1.0, 2.0].into()).unwrap();
        assert_eq!(d.names().collect::<Vec<_>>(), vec!["one"]);
    }

    #[test]
    fn stacking_keeps_snapshot() {
        let d = DataSets::from_input([("a", vec![1.0, 2.0, 3.0]), ("b", vec![1.0, 1.0])].into()).unwrap();
        let s = d.stacked();
        assert_eq!(s.get("a").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.get("b").unwrap(), &[2.0, 3.0]);
        assert_eq!(d.get("b").unwrap(), &[1.0, 1.0]);
    }

    #[test]
    fn longest_and_flat() {
        let d = DataSets::from_input([("a", vec![1.0, 2.0, 3.0]), ("b", vec![4.0, 5.0])].into()).unwrap();
        assert_eq!(d.longest_len(), 3);
        assert_eq!(d.flatten(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
