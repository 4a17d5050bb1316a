//! Backend capability set and operation-support classification.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use sleipnir_ir::{OpKind, Operation};

use crate::error::LowerResult;
use crate::resolver::unwrap_base;

/// The three-way verdict of support classification.
///
/// `NeedsDecomposition` is ordinary data that the lowering engine
/// branches on; only `Unsupported` is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportVerdict {
    /// The engine executes this operation natively.
    Supported,
    /// Not native, but a candidate for decomposition or the dense-matrix
    /// fallback.
    NeedsDecomposition,
    /// Structurally unsupported: no decomposition exists by construction.
    /// Fatal for the whole lowering call.
    Unsupported {
        /// Why the operation cannot run on the engine.
        reason: String,
    },
}

impl SupportVerdict {
    /// Check if the verdict is `Supported`.
    pub fn is_supported(&self) -> bool {
        matches!(self, SupportVerdict::Supported)
    }
}

/// The fixed set of operation kinds the engine executes natively.
///
/// Established once at construction and never mutated during lowering;
/// thread the value explicitly into the lowering engine rather than
/// consulting any ambient registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitySet {
    kinds: FxHashSet<OpKind>,
}

impl CapabilitySet {
    /// Build a capability set from explicit kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = OpKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// The native vocabulary of the local statevector engine: one- and
    /// two-qubit gates, measurement and reset variants, noise channels,
    /// annotations, structural containers, observables, and z-register
    /// arithmetic.
    ///
    /// Deliberately absent: composite modifiers (power, inverse,
    /// control), three-qubit gates, arbitrary-matrix gates (conditionally
    /// accepted up to two qubits by classification), tensor-network
    /// diagnostics, and oracles.
    pub fn statevector() -> Self {
        use OpKind::*;
        Self::from_kinds([
            // Single-qubit gates
            GateI, GateX, GateY, GateZ, GateH, GateS, GateSdg, GateT, GateTdg, GateSX,
            GateSXdg, GateP, GateRx, GateRy, GateRz, GateU,
            // Two-qubit gates
            GateCX, GateCY, GateCZ, GateCH, GateCS, GateCP, GateCRx, GateCRy, GateCRz,
            GateSwap, GateRXX, GateRYY, GateRZZ,
            // Declared gates
            Call,
            // Structural containers
            Block, Repeat, IfStatement,
            // Measurement and reset
            Measure, Reset, MeasureReset,
            // Annotations
            Barrier, Tick, Detector, ShiftCoordinates, QubitCoordinates,
            // Noise channels
            Depolarizing, PauliNoise, AmplitudeDamping, GeneralizedAmplitudeDamping,
            PhaseAmplitudeDamping, ProjectiveNoise, MixedUnitary, Kraus,
            // Observables
            PauliString, Hamiltonian, Amplitude,
            // Z-register arithmetic
            Add, Multiply, Pow, Not,
        ])
    }

    /// Check membership of an operation kind.
    pub fn contains(&self, kind: OpKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// A copy of this set without the given kinds. Useful for modeling
    /// engines with a restricted vocabulary.
    #[must_use]
    pub fn without(&self, kinds: impl IntoIterator<Item = OpKind>) -> Self {
        let mut out = self.kinds.clone();
        for kind in kinds {
            out.remove(&kind);
        }
        Self { kinds: out }
    }

    /// Number of native kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Classify an operation against this capability set.
    ///
    /// Rules, in order: exact-kind membership; if-statement recursion on
    /// the guarded operation; fixed rejection of tensor-network
    /// diagnostics; conditional acceptance of expectation values and
    /// arbitrary-matrix gates; fixed rejection of oracles; modifier
    /// unwrapping (classification only: a supported base never confers
    /// support on its wrapper); everything else is a decomposition
    /// candidate.
    pub fn classify(&self, op: &Operation) -> LowerResult<SupportVerdict> {
        if self.contains(op.kind()) {
            return Ok(SupportVerdict::Supported);
        }

        if let Operation::IfStatement { base, .. } = op {
            return self.classify(base);
        }

        match op {
            Operation::BondDim { .. } => {
                return Ok(SupportVerdict::Unsupported {
                    reason: "bond dimension is not defined for a statevector engine".into(),
                });
            }
            Operation::SchmidtRank { .. } => {
                return Ok(SupportVerdict::Unsupported {
                    reason: "the Schmidt rank is not defined for a statevector engine".into(),
                });
            }
            Operation::VonNeumannEntropy { .. } => {
                return Ok(SupportVerdict::Unsupported {
                    reason: "the von Neumann entropy is not defined for a statevector engine"
                        .into(),
                });
            }

            Operation::ExpectationValue { observable } => {
                if op.num_qubits() <= 2 {
                    return Ok(SupportVerdict::Supported);
                }
                if matches!(observable.as_ref(), Operation::PauliString(_)) {
                    return Ok(SupportVerdict::Supported);
                }
                return Ok(SupportVerdict::Unsupported {
                    reason: "expectation value of a non-Pauli observable on more than 2 qubits"
                        .into(),
                });
            }

            Operation::Custom(custom) => {
                if custom.num_qubits() <= 2 {
                    return Ok(SupportVerdict::Supported);
                }
                return Ok(SupportVerdict::Unsupported {
                    reason: "arbitrary-matrix gates with more than 2 qubits are not supported"
                        .into(),
                });
            }

            Operation::PolynomialOracle { .. } => {
                return Ok(SupportVerdict::Unsupported {
                    reason: "polynomial oracles have no local realization".into(),
                });
            }

            _ => {}
        }

        if op.is_modifier() {
            // Unwrapping is for classification only: a structurally
            // rejected base poisons the wrapper, a supported base does
            // not make the wrapper native.
            let base = unwrap_base(op)?;
            if let SupportVerdict::Unsupported { reason } = self.classify(base)? {
                return Ok(SupportVerdict::Unsupported { reason });
            }
            return Ok(SupportVerdict::NeedsDecomposition);
        }

        Ok(SupportVerdict::NeedsDecomposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use sleipnir_ir::{BitString, CustomGate, PauliString, StandardGate};

    fn caps() -> CapabilitySet {
        CapabilitySet::statevector()
    }

    #[test]
    fn test_native_gate_is_supported() {
        let verdict = caps().classify(&Operation::Gate(StandardGate::H)).unwrap();
        assert!(verdict.is_supported());
    }

    #[test]
    fn test_three_qubit_gate_needs_decomposition() {
        let verdict = caps().classify(&Operation::Gate(StandardGate::CCX)).unwrap();
        assert_eq!(verdict, SupportVerdict::NeedsDecomposition);
    }

    #[test]
    fn test_wrapped_supported_gate_is_not_native() {
        // H is native, Control(H) is not: the wrapper must lower.
        let op = Operation::control(1, Operation::Gate(StandardGate::H));
        assert_eq!(
            caps().classify(&op).unwrap(),
            SupportVerdict::NeedsDecomposition
        );
    }

    #[test]
    fn test_wrapped_diagnostic_is_rejected() {
        let op = Operation::inverse(Operation::BondDim { num_qubits: 2 });
        assert!(matches!(
            caps().classify(&op).unwrap(),
            SupportVerdict::Unsupported { .. }
        ));
    }

    #[test]
    fn test_if_statement_takes_guarded_verdict() {
        // Exact-kind membership fires first; with IfStatement removed the
        // verdict of the guarded operation shines through.
        let reduced = caps().without([OpKind::IfStatement]);

        let native = Operation::if_statement(
            Operation::Gate(StandardGate::X),
            BitString::parse("1").unwrap(),
        );
        assert!(caps().classify(&native).unwrap().is_supported());
        assert!(reduced.classify(&native).unwrap().is_supported());

        let guarded_diagnostic = Operation::if_statement(
            Operation::BondDim { num_qubits: 1 },
            BitString::parse("1").unwrap(),
        );
        assert!(matches!(
            reduced.classify(&guarded_diagnostic).unwrap(),
            SupportVerdict::Unsupported { .. }
        ));
    }

    #[test]
    fn test_expectation_value_rules() {
        let small = Operation::expectation_value(Operation::Gate(StandardGate::CZ));
        assert!(caps().classify(&small).unwrap().is_supported());

        let pauli = Operation::expectation_value(Operation::PauliString(
            PauliString::parse("XXZZ").unwrap(),
        ));
        assert!(caps().classify(&pauli).unwrap().is_supported());

        let dense = CustomGate::new(
            "obs",
            3,
            vec![Complex64::new(0.0, 0.0); 64],
        )
        .unwrap();
        let large = Operation::expectation_value(Operation::Custom(dense));
        assert!(matches!(
            caps().classify(&large).unwrap(),
            SupportVerdict::Unsupported { .. }
        ));
    }

    #[test]
    fn test_custom_gate_rules() {
        let small = CustomGate::new("g", 1, vec![Complex64::new(1.0, 0.0); 4]).unwrap();
        assert!(
            caps()
                .classify(&Operation::Custom(small))
                .unwrap()
                .is_supported()
        );

        let large = CustomGate::new("g", 3, vec![Complex64::new(0.0, 0.0); 64]).unwrap();
        assert!(matches!(
            caps().classify(&Operation::Custom(large)).unwrap(),
            SupportVerdict::Unsupported { .. }
        ));
    }

    #[test]
    fn test_oracle_is_rejected() {
        let op = Operation::PolynomialOracle {
            num_x: 2,
            num_y: 2,
            a: 1,
            b: 0,
            c: 0,
            d: 0,
        };
        assert!(matches!(
            caps().classify(&op).unwrap(),
            SupportVerdict::Unsupported { .. }
        ));
    }

    #[test]
    fn test_without_removes_kinds() {
        let reduced = caps().without([OpKind::GateCH]);
        assert!(!reduced.contains(OpKind::GateCH));
        assert!(reduced.contains(OpKind::GateH));
        assert_eq!(
            reduced
                .classify(&Operation::Gate(StandardGate::CH))
                .unwrap(),
            SupportVerdict::NeedsDecomposition
        );
    }
}
