//! Engine-contract tests against an in-process mock engine.
//!
//! The mock enforces exactly what the boundary promises: it accepts any
//! circuit satisfying the post-lowering invariants and rejects anything
//! else instead of decomposing it.

use async_trait::async_trait;

use sleipnir_hal::{Counts, Engine, HalError, HalResult, RunConfig, RunResult};
use sleipnir_ir::{Circuit, Operation, QubitId};
use sleipnir_lower::{CapabilitySet, Lowering};

/// A deterministic stand-in for the compiled statevector engine.
struct MockEngine {
    caps: CapabilitySet,
}

impl MockEngine {
    fn new() -> Self {
        Self {
            caps: CapabilitySet::statevector(),
        }
    }
}

#[async_trait]
impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock-statevector"
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    async fn execute(&self, circuit: &Circuit, config: &RunConfig) -> HalResult<RunResult> {
        if config.samples == 0 {
            return Err(HalError::InvalidSamples("sample count must be positive".into()));
        }
        for inst in circuit {
            if !self.caps.classify(inst.operation())?.is_supported() {
                return Err(HalError::Unsupported(format!(
                    "instruction '{}' is not engine-executable; lower the circuit first",
                    inst.name()
                )));
            }
        }
        // All samples land on the all-zero register: enough to exercise
        // the contract without simulating anything.
        let zeros = "0".repeat(circuit.num_bits().max(1));
        let counts = Counts::from_pairs([(zeros, u64::from(config.samples))]);
        Ok(RunResult::new(counts).with_execution_time(0))
    }
}

#[tokio::test]
async fn lowered_circuit_is_accepted() {
    let engine = MockEngine::new();
    let lowering = Lowering::new(engine.capabilities().clone());

    let mut circuit = Circuit::new("work");
    circuit.h(QubitId(0)).unwrap();
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    let lowered = lowering.lower(&circuit).unwrap();

    let result = engine
        .execute(&lowered, &RunConfig::new().with_samples(100).with_seed(1))
        .await
        .unwrap();
    assert_eq!(result.counts.total_samples(), 100);
}

#[tokio::test]
async fn unlowered_circuit_is_rejected() {
    let engine = MockEngine::new();

    let mut circuit = Circuit::new("raw");
    circuit
        .push_op(
            Operation::control(1, Operation::Gate(sleipnir_ir::StandardGate::H)),
            [QubitId(0), QubitId(1)],
            [],
            [],
        )
        .unwrap();

    let err = engine
        .execute(&circuit, &RunConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Unsupported(_)));
}

#[tokio::test]
async fn zero_samples_are_rejected() {
    let engine = MockEngine::new();
    let circuit = Circuit::new("empty");

    let err = engine
        .execute(&circuit, &RunConfig::new().with_samples(0))
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::InvalidSamples(_)));
}
