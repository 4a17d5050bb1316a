//! Ordered circuits and the builder API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::operation::Operation;
use crate::parameter::ParameterExpression;
use crate::wire::{BitId, QubitId, ZVarId};

/// A quantum circuit: an ordered sequence of instructions.
///
/// Order is execution order; nothing in this crate reorders instructions.
/// Wire counts grow automatically as instructions referencing new wires
/// are pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: usize,
    num_bits: usize,
    num_zvars: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_bits: 0,
            num_zvars: 0,
            instructions: vec![],
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        for q in instruction.qubits() {
            self.num_qubits = self.num_qubits.max(q.0 as usize + 1);
        }
        for b in instruction.bits() {
            self.num_bits = self.num_bits.max(b.0 as usize + 1);
        }
        for z in instruction.zvars() {
            self.num_zvars = self.num_zvars.max(z.0 as usize + 1);
        }
        self.instructions.push(instruction);
        self
    }

    /// Bind an operation to wires and append it.
    pub fn push_op(
        &mut self,
        operation: Operation,
        qubits: impl IntoIterator<Item = QubitId>,
        bits: impl IntoIterator<Item = BitId>,
        zvars: impl IntoIterator<Item = ZVarId>,
    ) -> IrResult<&mut Self> {
        let inst = Instruction::new(operation, qubits, bits, zvars)?;
        Ok(self.push(inst))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply a Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::H, qubit)?))
    }

    /// Apply a Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::X, qubit)?))
    }

    /// Apply a Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit)?))
    }

    /// Apply a Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit)?))
    }

    /// Apply an S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::S, qubit)?))
    }

    /// Apply a T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(StandardGate::T, qubit)?))
    }

    /// Apply an Rx rotation.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        )?))
    }

    /// Apply an Ry rotation.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        )?))
    }

    /// Apply an Rz rotation.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        )?))
    }

    /// Apply a phase gate.
    pub fn p(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::single_qubit_gate(
            StandardGate::P(lambda.into()),
            qubit,
        )?))
    }

    // =========================================================================
    // Two- and three-qubit gates
    // =========================================================================

    /// Apply a CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        )?))
    }

    /// Apply a CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        )?))
    }

    /// Apply a controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::two_qubit_gate(
            StandardGate::CH,
            control,
            target,
        )?))
    }

    /// Apply a controlled-phase gate.
    pub fn cp(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::two_qubit_gate(
            StandardGate::CP(lambda.into()),
            control,
            target,
        )?))
    }

    /// Apply a SWAP gate.
    pub fn swap(&mut self, q0: QubitId, q1: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::two_qubit_gate(StandardGate::Swap, q0, q1)?))
    }

    /// Apply a Toffoli (CCX) gate.
    pub fn ccx(&mut self, c0: QubitId, c1: QubitId, target: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::gate(StandardGate::CCX, [c0, c1, target])?))
    }

    // =========================================================================
    // Non-gate operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, bit: BitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::measure(qubit, bit)?))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        Ok(self.push(Instruction::reset(qubit)?))
    }

    /// Apply a barrier over the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let op = Operation::Barrier {
            num_qubits: qubits.len(),
        };
        self.push_op(op, qubits, [], [])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubit wires referenced.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of classical bit wires referenced.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Number of z-register wires referenced.
    pub fn num_zvars(&self) -> usize {
        self.num_zvars
    }

    /// The instructions, in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over the instructions.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// The distinct wires referenced by top-level instructions.
    pub fn referenced_wires(&self) -> WireUsage {
        let mut usage = WireUsage::default();
        for inst in &self.instructions {
            usage.qubits.extend(inst.qubits().iter().copied());
            usage.bits.extend(inst.bits().iter().copied());
            usage.zvars.extend(inst.zvars().iter().copied());
        }
        usage
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit with measurements.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new("bell");
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure(QubitId(0), BitId(0))?
            .measure(QubitId(1), BitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit with measurements.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new("ghz");
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), BitId(i))?;
        }
        Ok(circuit)
    }

    /// Create a QFT circuit (without measurements).
    pub fn qft(n: u32) -> IrResult<Self> {
        use std::f64::consts::PI;

        let mut circuit = Self::new("qft");
        for i in 0..n {
            circuit.h(QubitId(i))?;
            for j in (i + 1)..n {
                let angle = PI / f64::from(1u32 << (j - i));
                circuit.cp(angle, QubitId(j), QubitId(i))?;
            }
        }
        for i in 0..n / 2 {
            circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
        }
        Ok(circuit)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// Distinct wires referenced by a circuit, per address space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireUsage {
    /// Referenced qubit wires.
    pub qubits: BTreeSet<QubitId>,
    /// Referenced classical bit wires.
    pub bits: BTreeSet<BitId>,
    /// Referenced z-register wires.
    pub zvars: BTreeSet<ZVarId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_wire_counts_grow() {
        let mut circuit = Circuit::new("test");
        circuit.h(QubitId(3)).unwrap();
        circuit.measure(QubitId(3), BitId(1)).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_bits(), 2);
    }

    #[test]
    fn test_bell_circuit() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_bits(), 2);
    }

    #[test]
    fn test_ghz_circuit() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        // H + 4 CX + 5 measures
        assert_eq!(circuit.len(), 10);
    }

    #[test]
    fn test_qft_instruction_count() {
        let circuit = Circuit::qft(3).unwrap();
        // 3 H + 3 CP + 1 swap
        assert_eq!(circuit.len(), 7);
    }

    #[test]
    fn test_referenced_wires() {
        let circuit = Circuit::bell().unwrap();
        let usage = circuit.referenced_wires();
        assert_eq!(usage.qubits.len(), 2);
        assert_eq!(usage.bits.len(), 2);
        assert!(usage.zvars.is_empty());
    }
}
