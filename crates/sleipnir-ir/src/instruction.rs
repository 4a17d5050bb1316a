//! Instructions: an operation bound to concrete wires.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::operation::{OpKind, Operation};
use crate::wire::{BitId, QubitId, ZVarId};

/// An [`Operation`] bound to an arity-matching list of qubit, bit and
/// z-register wires.
///
/// Instructions are immutable once constructed; [`Instruction::new`] is
/// the only way to build one and validates the binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    operation: Operation,
    qubits: Vec<QubitId>,
    bits: Vec<BitId>,
    zvars: Vec<ZVarId>,
}

impl Instruction {
    /// Bind an operation to wires.
    ///
    /// Fails if any wire list does not match the operation's arity, or if
    /// a qubit appears twice.
    pub fn new(
        operation: Operation,
        qubits: impl IntoIterator<Item = QubitId>,
        bits: impl IntoIterator<Item = BitId>,
        zvars: impl IntoIterator<Item = ZVarId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let bits: Vec<_> = bits.into_iter().collect();
        let zvars: Vec<_> = zvars.into_iter().collect();

        let checks = [
            ("qubit", operation.num_qubits(), qubits.len()),
            ("bit", operation.num_bits(), bits.len()),
            ("zvar", operation.num_zvars(), zvars.len()),
        ];
        for (space, expected, got) in checks {
            if expected != got {
                return Err(IrError::ArityMismatch {
                    name: operation.name().to_string(),
                    space,
                    expected,
                    got,
                });
            }
        }

        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q.0,
                    name: operation.name().to_string(),
                });
            }
        }

        Ok(Self {
            operation,
            qubits,
            bits,
            zvars,
        })
    }

    /// Bind a gate to qubit wires only.
    pub fn gate(
        gate: impl Into<Operation>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        Self::new(gate.into(), qubits, [], [])
    }

    /// Bind a single-qubit gate.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> IrResult<Self> {
        Self::gate(gate, [qubit])
    }

    /// Bind a two-qubit gate.
    pub fn two_qubit_gate(gate: StandardGate, q0: QubitId, q1: QubitId) -> IrResult<Self> {
        Self::gate(gate, [q0, q1])
    }

    /// Bind a measurement.
    pub fn measure(qubit: QubitId, bit: BitId) -> IrResult<Self> {
        Self::new(Operation::Measure, [qubit], [bit], [])
    }

    /// Bind a reset.
    pub fn reset(qubit: QubitId) -> IrResult<Self> {
        Self::new(Operation::Reset, [qubit], [], [])
    }

    /// The bound operation.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// The qubit wires, in binding order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The classical bit wires, in binding order.
    pub fn bits(&self) -> &[BitId] {
        &self.bits
    }

    /// The z-register wires, in binding order.
    pub fn zvars(&self) -> &[ZVarId] {
        &self.zvars
    }

    /// The name of the bound operation.
    pub fn name(&self) -> &str {
        self.operation.name()
    }

    /// The kind tag of the bound operation.
    pub fn kind(&self) -> OpKind {
        self.operation.kind()
    }

    /// Rebind the same wires to a different operation of equal arity.
    pub fn with_operation(&self, operation: Operation) -> IrResult<Self> {
        Self::new(
            operation,
            self.qubits.iter().copied(),
            self.bits.iter().copied(),
            self.zvars.iter().copied(),
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if first {
                write!(f, " ")?;
                first = false;
            } else {
                write!(f, ", ")?;
            }
            Ok(())
        };
        for q in &self.qubits {
            sep(f)?;
            write!(f, "{q}")?;
        }
        for b in &self.bits {
            sep(f)?;
            write!(f, "{b}")?;
        }
        for z in &self.zvars {
            sep(f)?;
            write!(f, "{z}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0)).unwrap();
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.qubits(), &[QubitId(0)]);
        assert!(inst.bits().is_empty());
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(1), BitId(0)).unwrap();
        assert_eq!(inst.kind(), OpKind::Measure);
        assert_eq!(inst.bits(), &[BitId(0)]);
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let err = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(err, Err(IrError::ArityMismatch { .. })));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let err = Instruction::two_qubit_gate(StandardGate::CX, QubitId(2), QubitId(2));
        assert!(matches!(err, Err(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_display() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)).unwrap();
        assert_eq!(format!("{inst}"), "cx q0, q1");
    }
}
