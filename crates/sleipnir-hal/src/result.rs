//! Execution result types.
//!
//! Bitstring ordering: the leftmost character corresponds to the
//! lowest-indexed classical bit.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
///
/// Maps classical-register bitstrings to occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from (bitstring, count) pairs. Duplicate bitstrings
    /// are accumulated.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add to the count of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Total number of recorded samples.
    pub fn total_samples(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().max_by_key(|&(_, count)| count)
    }

    /// Per-bitstring probabilities.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_samples() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the counts are empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, value) in iter {
            counts.insert(key, value);
        }
        counts
    }
}

/// Everything an execution returns: classical register samples,
/// amplitude/statevector values for queried basis states, and the final
/// z-register contents per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Classical register samples.
    pub counts: Counts,
    /// Amplitudes for the queried basis states, in query order.
    pub amplitudes: Vec<Complex64>,
    /// Final z-register values, one vector per sample.
    pub zstates: Vec<Vec<Complex64>>,
    /// Engine-reported execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl RunResult {
    /// Create a result holding only counts.
    pub fn new(counts: Counts) -> Self {
        Self {
            counts,
            amplitudes: vec![],
            zstates: vec![],
            execution_time_ms: None,
        }
    }

    /// Attach amplitude values.
    #[must_use]
    pub fn with_amplitudes(mut self, amplitudes: Vec<Complex64>) -> Self {
        self.amplitudes = amplitudes;
        self
    }

    /// Attach z-register values.
    #[must_use]
    pub fn with_zstates(mut self, zstates: Vec<Vec<Complex64>>) -> Self {
        self.zstates = zstates;
        self
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 400);
        counts.insert("11", 500);
        counts.insert("00", 100);

        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_samples(), 1000);
    }

    #[test]
    fn test_probabilities() {
        let counts = Counts::from_pairs([("0", 250u64), ("1", 750u64)]);
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.25).abs() < 1e-12);
        assert!((probs["1"] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_most_frequent() {
        let counts = Counts::from_pairs([("00", 100u64), ("11", 900u64)]);
        let (bits, count) = counts.most_frequent().unwrap();
        assert_eq!(bits, "11");
        assert_eq!(*count, 900);
    }

    #[test]
    fn test_run_result_builder() {
        let result = RunResult::new(Counts::from_pairs([("0", 10u64)]))
            .with_amplitudes(vec![Complex64::new(1.0, 0.0)])
            .with_execution_time(7);
        assert_eq!(result.amplitudes.len(), 1);
        assert_eq!(result.execution_time_ms, Some(7));
    }
}
