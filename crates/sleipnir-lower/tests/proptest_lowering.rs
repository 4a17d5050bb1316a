//! Randomized closure and wire-preservation properties.

use proptest::prelude::*;

use sleipnir_ir::{
    BitId, Circuit, Instruction, NoiseChannel, Operation, QubitId, StandardGate,
};
use sleipnir_lower::{CapabilitySet, Lowering};

const WIRES: u32 = 6;

/// Three distinct qubits derived from random offsets.
fn distinct_qubits(q0: u32, d1: u32, d2: u32) -> (QubitId, QubitId, QubitId) {
    let a = q0 % WIRES;
    let b = (a + 1 + d1 % (WIRES - 1)) % WIRES;
    let mut c = (b + 1 + d2 % (WIRES - 1)) % WIRES;
    if c == a {
        c = (c + 1) % WIRES;
        if c == b {
            c = (c + 1) % WIRES;
        }
    }
    (QubitId(a), QubitId(b), QubitId(c))
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (
        0usize..12,
        0u32..WIRES,
        0u32..WIRES,
        0u32..WIRES,
        1i64..4,
        0.1f64..3.0,
    )
        .prop_map(|(select, q0, d1, d2, count, angle)| {
            let (a, b, c) = distinct_qubits(q0, d1, d2);
            match select {
                0 => Instruction::single_qubit_gate(StandardGate::H, a),
                1 => Instruction::two_qubit_gate(StandardGate::CX, a, b),
                2 => Instruction::single_qubit_gate(StandardGate::Rz(angle.into()), a),
                3 => Instruction::gate(StandardGate::CCX, [a, b, c]),
                4 => Instruction::new(
                    Operation::control(1, Operation::Gate(StandardGate::H)),
                    [a, b],
                    [],
                    [],
                ),
                5 => Instruction::new(
                    Operation::power(Operation::Gate(StandardGate::X), count as f64),
                    [a],
                    [],
                    [],
                ),
                6 => Instruction::new(
                    Operation::inverse(Operation::Gate(StandardGate::T)),
                    [a],
                    [],
                    [],
                ),
                7 => Instruction::two_qubit_gate(StandardGate::Swap, a, b),
                8 => Instruction::new(
                    Operation::control(2, Operation::Gate(StandardGate::T)),
                    [a, b, c],
                    [],
                    [],
                ),
                9 => Instruction::new(
                    Operation::repeat(count as u32, Operation::Gate(StandardGate::X)),
                    [a],
                    [],
                    [],
                ),
                10 => Instruction::measure(a, BitId(a.0)),
                _ => Instruction::new(
                    Operation::Noise(NoiseChannel::Depolarizing { p: 0.01 }),
                    [a],
                    [],
                    [],
                ),
            }
            .expect("generated instruction is well-formed")
        })
}

fn assert_closed(caps: &CapabilitySet, circuit: &Circuit) {
    fn check(caps: &CapabilitySet, inst: &Instruction) {
        assert!(
            caps.classify(inst.operation()).unwrap().is_supported(),
            "leaf '{}' is not engine-executable",
            inst.name()
        );
        if let Operation::Block { body, .. } = inst.operation() {
            for piece in body {
                check(caps, piece);
            }
        }
    }
    for inst in circuit {
        check(caps, inst);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every successfully lowered circuit is closed over the capability
    /// set and references exactly the original wires.
    #[test]
    fn lowering_is_closed_and_wire_preserving(
        instructions in prop::collection::vec(arb_instruction(), 1..16)
    ) {
        let mut circuit = Circuit::new("random");
        for inst in instructions {
            circuit.push(inst);
        }

        let caps = CapabilitySet::statevector();
        let lowering = Lowering::new(caps.clone());
        let lowered = lowering.lower(&circuit).unwrap();

        assert_closed(&caps, &lowered);
        prop_assert_eq!(lowered.referenced_wires(), circuit.referenced_wires());
    }

    /// Lowering is deterministic and idempotent: lowering a lowered
    /// circuit changes nothing.
    #[test]
    fn lowering_is_idempotent(
        instructions in prop::collection::vec(arb_instruction(), 1..16)
    ) {
        let mut circuit = Circuit::new("random");
        for inst in instructions {
            circuit.push(inst);
        }

        let lowering = Lowering::new(CapabilitySet::statevector());
        let once = lowering.lower(&circuit).unwrap();
        let twice = lowering.lower(&once).unwrap();
        prop_assert_eq!(once, twice);
    }
}
