//! The circuit interchange boundary.
//!
//! The engine's native binary codec is external. This module pins down
//! what any codec must preserve (instruction count, operation kind,
//! wire assignment, and numeric parameters to a fixed tolerance) and
//! provides a serde-based reference codec used by tests and local
//! tooling.

use tracing::debug;

use sleipnir_ir::{Circuit, Instruction, NoiseChannel, Operation};

use crate::error::{HalError, HalResult};

/// Numeric tolerance of the interchange contract.
pub const INTERCHANGE_TOLERANCE: f64 = 1e-6;

/// A circuit codec for the engine boundary.
pub trait CircuitCodec {
    /// Serialize a circuit to the codec's byte representation.
    fn encode(&self, circuit: &Circuit) -> HalResult<Vec<u8>>;

    /// Parse a circuit back from the codec's byte representation.
    fn decode(&self, bytes: &[u8]) -> HalResult<Circuit>;
}

/// Reference codec backed by serde_json.
///
/// Not the engine's native format; a faithful, dependency-light stand-in
/// that satisfies the same bijection contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl CircuitCodec for JsonCodec {
    fn encode(&self, circuit: &Circuit) -> HalResult<Vec<u8>> {
        serde_json::to_vec(circuit)
            .map_err(|err| HalError::conversion("encoding circuit to JSON", err))
    }

    fn decode(&self, bytes: &[u8]) -> HalResult<Circuit> {
        serde_json::from_slice(bytes)
            .map_err(|err| HalError::conversion("decoding circuit from JSON", err))
    }
}

/// Verify the interchange contract between a circuit and its decoded
/// counterpart: same instruction count, operation kinds, wire
/// assignments, and numeric parameters within `tolerance`.
pub fn check_interchange(
    original: &Circuit,
    decoded: &Circuit,
    tolerance: f64,
) -> HalResult<()> {
    if original.len() != decoded.len() {
        return Err(HalError::mismatch(format!(
            "instruction count changed: {} != {}",
            original.len(),
            decoded.len()
        )));
    }

    for (index, (a, b)) in original.iter().zip(decoded.iter()).enumerate() {
        check_instruction(index, a, b, tolerance)?;
    }

    debug!(instructions = original.len(), "interchange check passed");
    Ok(())
}

fn check_instruction(
    index: usize,
    a: &Instruction,
    b: &Instruction,
    tolerance: f64,
) -> HalResult<()> {
    if a.kind() != b.kind() {
        return Err(HalError::mismatch(format!(
            "instruction {index}: kind changed from '{}' to '{}'",
            a.name(),
            b.name()
        )));
    }
    if a.qubits() != b.qubits() || a.bits() != b.bits() || a.zvars() != b.zvars() {
        return Err(HalError::mismatch(format!(
            "instruction {index} ('{}'): wire assignment changed",
            a.name()
        )));
    }

    let mut params_a = Vec::new();
    let mut params_b = Vec::new();
    numeric_params(a.operation(), &mut params_a);
    numeric_params(b.operation(), &mut params_b);

    if params_a.len() != params_b.len() {
        return Err(HalError::mismatch(format!(
            "instruction {index} ('{}'): parameter count changed: {} != {}",
            a.name(),
            params_a.len(),
            params_b.len()
        )));
    }
    for (pa, pb) in params_a.iter().zip(&params_b) {
        if (pa - pb).abs() > tolerance {
            return Err(HalError::mismatch(format!(
                "instruction {index} ('{}'): parameter drifted: {pa} != {pb}",
                a.name()
            )));
        }
    }
    Ok(())
}

/// Collect every numeric parameter of an operation in a fixed order:
/// rotation angles, matrix entries, noise probabilities, arithmetic
/// constants, coordinates.
fn numeric_params(op: &Operation, out: &mut Vec<f64>) {
    match op {
        Operation::Gate(gate) => {
            for param in gate.parameters() {
                if let Some(value) = param.evaluate() {
                    out.push(value);
                }
            }
        }
        Operation::Custom(custom) => {
            for entry in custom.matrix().elements() {
                out.push(entry.re);
                out.push(entry.im);
            }
        }
        Operation::Call(call) => {
            for inst in &call.decl.body {
                numeric_params(inst.operation(), out);
            }
        }
        Operation::Power { base, exponent } => {
            out.push(*exponent);
            numeric_params(base, out);
        }
        Operation::Inverse { base }
        | Operation::Control { base, .. }
        | Operation::Repeat { base, .. }
        | Operation::IfStatement { base, .. } => numeric_params(base, out),
        Operation::Block { body, .. } => {
            for inst in body {
                numeric_params(inst.operation(), out);
            }
        }
        Operation::Noise(channel) => {
            out.extend(channel.parameters());
            match channel {
                NoiseChannel::MixedUnitary { terms } => {
                    for (_, matrix) in terms {
                        for entry in matrix.elements() {
                            out.push(entry.re);
                            out.push(entry.im);
                        }
                    }
                }
                NoiseChannel::Kraus { operators } => {
                    for matrix in operators {
                        for entry in matrix.elements() {
                            out.push(entry.re);
                            out.push(entry.im);
                        }
                    }
                }
                _ => {}
            }
        }
        Operation::ExpectationValue { observable } => numeric_params(observable, out),
        Operation::Hamiltonian { terms } => {
            out.extend(terms.iter().map(|t| t.coefficient));
        }
        Operation::ShiftCoordinates { coordinates }
        | Operation::QubitCoordinates { coordinates } => out.extend(coordinates),
        Operation::Add { constant, .. } | Operation::Multiply { constant, .. } => {
            out.push(*constant);
        }
        Operation::Pow { exponent } => out.push(*exponent),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use sleipnir_ir::{
        BitId, BitString, CustomGate, HamiltonianTerm, PauliString, QubitId, StandardGate,
        ZVarId,
    };

    /// A circuit touching every operation category.
    fn kitchen_sink() -> Circuit {
        let mut circuit = Circuit::new("sink");
        circuit.h(QubitId(0)).unwrap();
        circuit.rx(0.123_456_789, QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit
            .push_op(
                Operation::Custom(
                    CustomGate::new(
                        "g",
                        1,
                        vec![
                            Complex64::new(0.0, 1.0),
                            Complex64::new(0.0, 0.0),
                            Complex64::new(0.0, 0.0),
                            Complex64::new(0.0, -1.0),
                        ],
                    )
                    .unwrap(),
                ),
                [QubitId(2)],
                [],
                [],
            )
            .unwrap();
        circuit
            .push_op(
                Operation::power(Operation::Gate(StandardGate::X), 3.0),
                [QubitId(0)],
                [],
                [],
            )
            .unwrap();
        circuit
            .push_op(
                Operation::Noise(sleipnir_ir::NoiseChannel::GeneralizedAmplitudeDamping {
                    p: 0.25,
                    gamma: 0.0625,
                }),
                [QubitId(1)],
                [],
                [],
            )
            .unwrap();
        circuit
            .push_op(
                Operation::Hamiltonian {
                    terms: vec![
                        HamiltonianTerm::new(0.5, PauliString::parse("XX").unwrap()),
                        HamiltonianTerm::new(-1.25, PauliString::parse("ZZ").unwrap()),
                    ],
                },
                [QubitId(0), QubitId(1)],
                [],
                [],
            )
            .unwrap();
        circuit
            .push_op(
                Operation::Add {
                    operands: 2,
                    constant: 5.0,
                },
                [],
                [],
                [ZVarId(0), ZVarId(1)],
            )
            .unwrap();
        circuit
            .push_op(
                Operation::if_statement(
                    Operation::Gate(StandardGate::X),
                    BitString::parse("1").unwrap(),
                ),
                [QubitId(0)],
                [BitId(0)],
                [],
            )
            .unwrap();
        circuit.measure(QubitId(0), BitId(0)).unwrap();
        circuit
    }

    #[test]
    fn test_json_roundtrip_satisfies_contract() {
        let circuit = kitchen_sink();
        let codec = JsonCodec;
        let bytes = codec.encode(&circuit).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        check_interchange(&circuit, &decoded, INTERCHANGE_TOLERANCE).unwrap();
        assert_eq!(decoded, circuit);
    }

    #[test]
    fn test_instruction_count_mismatch_is_detected() {
        let circuit = kitchen_sink();
        let mut truncated = Circuit::new(circuit.name());
        for inst in circuit.iter().take(circuit.len() - 1) {
            truncated.push(inst.clone());
        }
        let err = check_interchange(&circuit, &truncated, INTERCHANGE_TOLERANCE).unwrap_err();
        assert!(matches!(err, HalError::Conversion { .. }));
    }

    #[test]
    fn test_kind_change_is_detected() {
        let mut a = Circuit::new("a");
        a.h(QubitId(0)).unwrap();
        let mut b = Circuit::new("b");
        b.x(QubitId(0)).unwrap();
        assert!(check_interchange(&a, &b, INTERCHANGE_TOLERANCE).is_err());
    }

    #[test]
    fn test_wire_change_is_detected() {
        let mut a = Circuit::new("a");
        a.cx(QubitId(0), QubitId(1)).unwrap();
        let mut b = Circuit::new("b");
        b.cx(QubitId(1), QubitId(0)).unwrap();
        assert!(check_interchange(&a, &b, INTERCHANGE_TOLERANCE).is_err());
    }

    #[test]
    fn test_parameter_drift_is_detected() {
        let mut a = Circuit::new("a");
        a.rz(1.0, QubitId(0)).unwrap();
        let mut b = Circuit::new("b");
        b.rz(1.0 + 1e-3, QubitId(0)).unwrap();
        assert!(check_interchange(&a, &b, INTERCHANGE_TOLERANCE).is_err());

        // Drift below tolerance is accepted.
        let mut c = Circuit::new("c");
        c.rz(1.0 + 1e-9, QubitId(0)).unwrap();
        check_interchange(&a, &c, INTERCHANGE_TOLERANCE).unwrap();
    }
}
