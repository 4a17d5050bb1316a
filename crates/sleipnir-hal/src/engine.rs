//! The execution-engine contract.
//!
//! The statevector engine itself is an external, compiled system. This
//! module pins down the boundary: a lowered circuit plus a run
//! configuration goes in, classical samples, amplitudes and z-register
//! values come out.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sleipnir_ir::{BitString, Circuit};
use sleipnir_lower::CapabilitySet;

use crate::error::HalResult;
use crate::result::RunResult;

/// Configuration for one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of classical samples to draw.
    pub samples: u32,
    /// RNG seed; `None` lets the engine choose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Basis states whose amplitudes are reported alongside samples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bitstrings: Vec<BitString>,
    /// Wall-clock budget for the execution.
    pub time_limit: Duration,
    /// Bond dimension for tensor-network backends. The statevector
    /// engine ignores it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_dim: Option<u32>,
}

impl RunConfig {
    /// Default configuration: 1000 samples, engine-chosen seed, 5-minute
    /// time limit.
    pub fn new() -> Self {
        Self {
            samples: 1000,
            seed: None,
            bitstrings: vec![],
            time_limit: Duration::from_secs(300),
            bond_dim: None,
        }
    }

    /// Set the sample count.
    #[must_use]
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Request amplitudes for specific basis states.
    #[must_use]
    pub fn with_bitstrings(mut self, bitstrings: Vec<BitString>) -> Self {
        self.bitstrings = bitstrings;
        self
    }

    /// Set the time limit.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The execution engine collaborator.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; the set is cached
///   at construction and never changes afterwards.
/// - `execute()` expects a circuit that already satisfies the
///   post-lowering invariants: every leaf is in the capability set or is
///   a dense-matrix gate on at most two qubits. Engines reject anything
///   else rather than silently decomposing it.
#[async_trait]
pub trait Engine: Send + Sync {
    /// The name of this engine.
    fn name(&self) -> &str;

    /// The operation kinds this engine executes natively.
    fn capabilities(&self) -> &CapabilitySet;

    /// Execute a lowered circuit.
    async fn execute(&self, circuit: &Circuit, config: &RunConfig) -> HalResult<RunResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new();
        assert_eq!(config.samples, 1000);
        assert_eq!(config.seed, None);
        assert_eq!(config.time_limit, Duration::from_secs(300));
        assert!(config.bond_dim.is_none());
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new()
            .with_samples(64)
            .with_seed(7)
            .with_bitstrings(vec![BitString::parse("01").unwrap()])
            .with_time_limit(Duration::from_secs(10));
        assert_eq!(config.samples, 64);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bitstrings.len(), 1);
    }

    #[test]
    fn test_run_config_serde_roundtrip() {
        let config = RunConfig::new().with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
