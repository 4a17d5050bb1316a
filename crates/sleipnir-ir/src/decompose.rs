//! Per-kind decomposition rules.
//!
//! [`Instruction::decompose`] expands one instruction into an equivalent
//! ordered sequence over the same wires. Containers inline their bodies,
//! modifiers rewrite toward native gates, and multi-controlled unitaries
//! use the two-level √U construction. Wire preservation is structural:
//! every emitted instruction binds wires drawn from the parent's binding.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, StandardGate};
use crate::instruction::Instruction;
use crate::matrix::Matrix2;
use crate::operation::Operation;
use crate::parameter::ParameterExpression;
use crate::wire::{BitId, QubitId, ZVarId};

impl Instruction {
    /// Expand this instruction into an equivalent ordered sequence.
    ///
    /// Fails with [`IrError::NoDecomposition`] for kinds that have no
    /// rule (primitive leaves, observables, channels) and
    /// [`IrError::NonIntegerPower`] for non-integer power modifiers.
    pub fn decompose(&self) -> IrResult<Vec<Instruction>> {
        match self.operation() {
            Operation::Gate(gate) => decompose_gate(gate, self.qubits()),
            Operation::Call(call) => {
                remap_body(&call.decl.body, &call.decl.name, self.qubits(), &[], &[])
            }
            Operation::Power { base, exponent } => decompose_power(self, base, *exponent),
            Operation::Inverse { base } => decompose_inverse(self, base),
            Operation::Control { controls, base } => decompose_control(self, *controls, base),
            Operation::Block { body, .. } => {
                remap_body(body, "block", self.qubits(), self.bits(), self.zvars())
            }
            Operation::Repeat { times, base } => {
                if *times == 0 {
                    return identity_on(self.qubits());
                }
                let inner = self.with_operation(base.as_ref().clone())?;
                Ok(vec![inner; *times as usize])
            }
            Operation::IfStatement { base, condition } => {
                let width = condition.width();
                let inner = Instruction::new(
                    base.as_ref().clone(),
                    self.qubits().iter().copied(),
                    self.bits()[width..].iter().copied(),
                    self.zvars().iter().copied(),
                )?;
                let mut out = Vec::new();
                for piece in inner.decompose()? {
                    let mut bits: Vec<BitId> = self.bits()[..width].to_vec();
                    bits.extend_from_slice(piece.bits());
                    out.push(Instruction::new(
                        Operation::if_statement(piece.operation().clone(), condition.clone()),
                        piece.qubits().iter().copied(),
                        bits,
                        piece.zvars().iter().copied(),
                    )?);
                }
                Ok(out)
            }
            other => Err(IrError::NoDecomposition(other.name().to_string())),
        }
    }
}

/// Remap a body over container-local wires onto the container's binding.
fn remap_body(
    body: &[Instruction],
    name: &str,
    qubits: &[QubitId],
    bits: &[BitId],
    zvars: &[ZVarId],
) -> IrResult<Vec<Instruction>> {
    body.iter()
        .map(|inst| {
            let q = inst
                .qubits()
                .iter()
                .map(|q| {
                    qubits
                        .get(q.0 as usize)
                        .copied()
                        .ok_or_else(|| IrError::WireOutOfRange {
                            index: q.0 as usize,
                            name: name.to_string(),
                            space: "qubit",
                            arity: qubits.len(),
                        })
                })
                .collect::<IrResult<Vec<_>>>()?;
            let b = inst
                .bits()
                .iter()
                .map(|b| {
                    bits.get(b.0 as usize)
                        .copied()
                        .ok_or_else(|| IrError::WireOutOfRange {
                            index: b.0 as usize,
                            name: name.to_string(),
                            space: "bit",
                            arity: bits.len(),
                        })
                })
                .collect::<IrResult<Vec<_>>>()?;
            let z = inst
                .zvars()
                .iter()
                .map(|z| {
                    zvars
                        .get(z.0 as usize)
                        .copied()
                        .ok_or_else(|| IrError::WireOutOfRange {
                            index: z.0 as usize,
                            name: name.to_string(),
                            space: "zvar",
                            arity: zvars.len(),
                        })
                })
                .collect::<IrResult<Vec<_>>>()?;
            Instruction::new(inst.operation().clone(), q, b, z)
        })
        .collect()
}

fn decompose_power(inst: &Instruction, base: &Operation, exponent: f64) -> IrResult<Vec<Instruction>> {
    if exponent.fract().abs() > f64::EPSILON {
        return Err(IrError::NonIntegerPower {
            name: base.name().to_string(),
            exponent,
        });
    }
    let n = exponent as i64;
    if n == 0 {
        // U^0 = I; keep the wire set intact.
        return identity_on(inst.qubits());
    }
    let op = if n < 0 {
        Operation::inverse(base.clone())
    } else {
        base.clone()
    };
    let inner = inst.with_operation(op)?;
    Ok(vec![inner; n.unsigned_abs() as usize])
}

/// One identity gate per qubit wire, preserving the referenced wire set.
fn identity_on(qubits: &[QubitId]) -> IrResult<Vec<Instruction>> {
    qubits
        .iter()
        .map(|q| Instruction::single_qubit_gate(StandardGate::I, *q))
        .collect()
}

fn decompose_inverse(inst: &Instruction, base: &Operation) -> IrResult<Vec<Instruction>> {
    match base {
        Operation::Gate(g) => Ok(vec![inst.with_operation(Operation::Gate(g.inverse()))?]),
        Operation::Custom(c) => Ok(vec![inst.with_operation(Operation::Custom(c.inverse()))?]),
        Operation::Inverse { base: inner } => {
            Ok(vec![inst.with_operation(inner.as_ref().clone())?])
        }
        Operation::Power { base: inner, exponent } => Ok(vec![inst.with_operation(
            Operation::power(Operation::inverse(inner.as_ref().clone()), *exponent),
        )?]),
        Operation::Control { controls, base: inner } => Ok(vec![inst.with_operation(
            Operation::control(*controls, Operation::inverse(inner.as_ref().clone())),
        )?]),
        Operation::Repeat { times, base: inner } => Ok(vec![inst.with_operation(
            Operation::repeat(*times, Operation::inverse(inner.as_ref().clone())),
        )?]),
        Operation::Call(call) => {
            // Inline the declaration body reversed, each piece inverted.
            let body = remap_body(&call.decl.body, &call.decl.name, inst.qubits(), &[], &[])?;
            body.iter()
                .rev()
                .map(|piece| {
                    piece.with_operation(Operation::inverse(piece.operation().clone()))
                })
                .collect()
        }
        Operation::Block {
            num_qubits,
            num_bits,
            num_zvars,
            body,
        } => {
            let inverted = body
                .iter()
                .rev()
                .map(|piece| {
                    piece.with_operation(Operation::inverse(piece.operation().clone()))
                })
                .collect::<IrResult<Vec<_>>>()?;
            Ok(vec![inst.with_operation(Operation::Block {
                num_qubits: *num_qubits,
                num_bits: *num_bits,
                num_zvars: *num_zvars,
                body: inverted,
            })?])
        }
        other => Err(IrError::NoDecomposition(format!(
            "inverse of {}",
            other.name()
        ))),
    }
}

fn decompose_control(
    inst: &Instruction,
    controls: usize,
    base: &Operation,
) -> IrResult<Vec<Instruction>> {
    // Nested controls flatten into one modifier.
    if let Operation::Control {
        controls: inner_controls,
        base: inner,
    } = base
    {
        return Ok(vec![inst.with_operation(Operation::control(
            controls + inner_controls,
            inner.as_ref().clone(),
        ))?]);
    }

    // A single control over a gate with a native controlled form.
    if controls == 1 {
        if let Operation::Gate(g) = base {
            if let Some(cg) = g.with_control() {
                return Ok(vec![inst.with_operation(Operation::Gate(cg))?]);
            }
        }
    }

    // Concrete single-qubit unitaries: textbook constructions.
    if let Some(m) = base.matrix() {
        if let Some(m2) = m.as_matrix2() {
            return if controls == 1 {
                controlled_unitary_zyz(inst.qubits()[0], inst.qubits()[1], &m2)
            } else {
                multi_controlled_unitary(inst.qubits(), controls, base.name(), &m2)
            };
        }
    }

    // Peel one control into the gate where the vocabulary allows it.
    if let Operation::Gate(g) = base {
        if let Some(cg) = g.with_control() {
            return Ok(vec![inst.with_operation(Operation::control(
                controls - 1,
                Operation::Gate(cg),
            ))?]);
        }
    }

    // Push an inversion into the wrapped operation. Pulling it outward
    // instead would recreate this control via the inverse rule and never
    // make progress.
    if let Operation::Inverse { base: inner } = base {
        let pushed = match inner.as_ref() {
            Operation::Gate(g) => Some(Operation::Gate(g.inverse())),
            Operation::Custom(c) => Some(Operation::Custom(c.inverse())),
            Operation::Inverse { base: twice } => Some(twice.as_ref().clone()),
            Operation::Power {
                base: b,
                exponent,
            } => Some(Operation::power(
                Operation::inverse(b.as_ref().clone()),
                *exponent,
            )),
            _ => None,
        };
        if let Some(op) = pushed {
            return Ok(vec![
                inst.with_operation(Operation::control(controls, op))?,
            ]);
        }
    }

    // C(Uⁿ) = (C U)ⁿ for integer n.
    if let Operation::Power { base: b, exponent } = base {
        if exponent.fract().abs() < f64::EPSILON {
            let n = *exponent as i64;
            if n == 0 {
                return identity_on(inst.qubits());
            }
            let wrapped = if n < 0 {
                Operation::inverse(b.as_ref().clone())
            } else {
                b.as_ref().clone()
            };
            let piece = inst.with_operation(Operation::control(controls, wrapped))?;
            return Ok(vec![piece; n.unsigned_abs() as usize]);
        }
    }

    Err(IrError::NoDecomposition(format!(
        "control of {}",
        base.name()
    )))
}

/// Controlled single-qubit unitary via the ZYZ construction:
/// `U = e^{iα}·Rz(β)·Ry(γ)·Rz(δ)` gives `C-U = P(α)ᶜ · A·X·B·X·C` with
/// `A·B·C = I` on the target.
fn controlled_unitary_zyz(
    control: QubitId,
    target: QubitId,
    m: &Matrix2,
) -> IrResult<Vec<Instruction>> {
    // zyz returns U = phase·Rz(α)·Ry(β)·Rz(γ); rename into the lemma's
    // (β, γ, δ, α) convention.
    let (beta, gamma, delta, alpha) = m.zyz_decomposition();

    let rz = |theta: f64, q: QubitId| {
        Instruction::single_qubit_gate(StandardGate::Rz(ParameterExpression::constant(theta)), q)
    };
    let ry = |theta: f64, q: QubitId| {
        Instruction::single_qubit_gate(StandardGate::Ry(ParameterExpression::constant(theta)), q)
    };

    Ok(vec![
        // C = Rz((δ-β)/2)
        rz((delta - beta) / 2.0, target)?,
        Instruction::two_qubit_gate(StandardGate::CX, control, target)?,
        // B = Ry(-γ/2)·Rz(-(δ+β)/2)
        rz(-(delta + beta) / 2.0, target)?,
        ry(-gamma / 2.0, target)?,
        Instruction::two_qubit_gate(StandardGate::CX, control, target)?,
        // A = Rz(β)·Ry(γ/2)
        ry(gamma / 2.0, target)?,
        rz(beta, target)?,
        // Phase correction on the control.
        Instruction::single_qubit_gate(
            StandardGate::P(ParameterExpression::constant(alpha)),
            control,
        )?,
    ])
}

/// `C^k(U)` via the two-level construction with `V = √U`:
/// `C^k(U) = CV(c_k,t) · C^{k-1}X(c₁..c_{k-1}, c_k) · CV†(c_k,t)
///           · C^{k-1}X(c₁..c_{k-1}, c_k) · C^{k-1}V(c₁..c_{k-1}, t)`.
fn multi_controlled_unitary(
    qubits: &[QubitId],
    controls: usize,
    base_name: &str,
    m: &Matrix2,
) -> IrResult<Vec<Instruction>> {
    let v = m.sqrt();
    let v_gate = Operation::Custom(CustomGate::from_matrix(
        format!("{base_name}_sqrt"),
        v.into(),
    ));
    let vdg_gate = Operation::Custom(CustomGate::from_matrix(
        format!("{base_name}_sqrt_dg"),
        v.dagger().into(),
    ));

    let outer = &qubits[..controls - 1];
    let last = qubits[controls - 1];
    let target = qubits[controls];

    let cnot_wires: Vec<QubitId> = outer.iter().copied().chain([last]).collect();
    let rest_wires: Vec<QubitId> = outer.iter().copied().chain([target]).collect();
    let cnot = Instruction::new(
        Operation::control(controls - 1, Operation::Gate(StandardGate::X)),
        cnot_wires,
        [],
        [],
    )?;

    Ok(vec![
        Instruction::new(Operation::control(1, v_gate.clone()), [last, target], [], [])?,
        cnot.clone(),
        Instruction::new(Operation::control(1, vdg_gate), [last, target], [], [])?,
        cnot,
        Instruction::new(
            Operation::control(controls - 1, v_gate),
            rest_wires,
            [],
            [],
        )?,
    ])
}

/// Fixed decompositions for standard gates without native support.
fn decompose_gate(gate: &StandardGate, qubits: &[QubitId]) -> IrResult<Vec<Instruction>> {
    let single = Instruction::single_qubit_gate;
    let two = Instruction::two_qubit_gate;
    let c = ParameterExpression::constant;

    match gate {
        // U(θ,φ,λ) = P(φ)·Ry(θ)·P(λ)
        StandardGate::U(theta, phi, lambda) => {
            let q = qubits[0];
            Ok(vec![
                single(StandardGate::P(lambda.clone()), q)?,
                single(StandardGate::Ry(theta.clone()), q)?,
                single(StandardGate::P(phi.clone()), q)?,
            ])
        }

        // CY = (I⊗S)·CX·(I⊗S†)
        StandardGate::CY => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::Sdg, t)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::S, t)?,
            ])
        }

        // CZ = (I⊗H)·CX·(I⊗H)
        StandardGate::CZ => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::H, t)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::H, t)?,
            ])
        }

        // CH = (I⊗Ry(-π/4))·CX·(I⊗Ry(π/4))
        StandardGate::CH => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::Ry(c(FRAC_PI_4)), t)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::Ry(c(-FRAC_PI_4)), t)?,
            ])
        }

        // CS = CP(π/2)
        StandardGate::CS => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![two(StandardGate::CP(c(FRAC_PI_2)), cq, t)?])
        }

        // CP(λ) = P(λ/2)ᶜ · CX · P(-λ/2)ᵗ · CX · P(λ/2)ᵗ
        StandardGate::CP(lambda) => {
            let (cq, t) = (qubits[0], qubits[1]);
            let half = lambda.clone() / c(2.0);
            Ok(vec![
                single(StandardGate::P(half.clone()), cq)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::P(-half.clone()), t)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::P(half), t)?,
            ])
        }

        // CRz(θ) = Rz(θ/2)ᵗ · CX · Rz(-θ/2)ᵗ · CX
        StandardGate::CRz(theta) => {
            let (cq, t) = (qubits[0], qubits[1]);
            let half = theta.clone() / c(2.0);
            Ok(vec![
                single(StandardGate::Rz(half.clone()), t)?,
                two(StandardGate::CX, cq, t)?,
                single(StandardGate::Rz(-half), t)?,
                two(StandardGate::CX, cq, t)?,
            ])
        }

        // CRx(θ) = (I⊗H)·CRz(θ)·(I⊗H)
        StandardGate::CRx(theta) => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::H, t)?,
                two(StandardGate::CRz(theta.clone()), cq, t)?,
                single(StandardGate::H, t)?,
            ])
        }

        // CRy(θ) = (I⊗S)·CRx(θ)·(I⊗S†)
        StandardGate::CRy(theta) => {
            let (cq, t) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::Sdg, t)?,
                two(StandardGate::CRx(theta.clone()), cq, t)?,
                single(StandardGate::S, t)?,
            ])
        }

        // SWAP = CX·CX·CX with alternating direction
        StandardGate::Swap => {
            let (a, b) = (qubits[0], qubits[1]);
            Ok(vec![
                two(StandardGate::CX, a, b)?,
                two(StandardGate::CX, b, a)?,
                two(StandardGate::CX, a, b)?,
            ])
        }

        // RZZ(θ) = CX·Rz(θ)ᵗ·CX
        StandardGate::RZZ(theta) => {
            let (a, b) = (qubits[0], qubits[1]);
            Ok(vec![
                two(StandardGate::CX, a, b)?,
                single(StandardGate::Rz(theta.clone()), b)?,
                two(StandardGate::CX, a, b)?,
            ])
        }

        // RXX(θ) = (H⊗H)·RZZ(θ)·(H⊗H)
        StandardGate::RXX(theta) => {
            let (a, b) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::H, a)?,
                single(StandardGate::H, b)?,
                two(StandardGate::RZZ(theta.clone()), a, b)?,
                single(StandardGate::H, a)?,
                single(StandardGate::H, b)?,
            ])
        }

        // RYY(θ) = (Rx(-π/2)⊗Rx(-π/2))·RZZ(θ)·(Rx(π/2)⊗Rx(π/2))
        StandardGate::RYY(theta) => {
            let (a, b) = (qubits[0], qubits[1]);
            Ok(vec![
                single(StandardGate::Rx(c(-FRAC_PI_2)), a)?,
                single(StandardGate::Rx(c(-FRAC_PI_2)), b)?,
                two(StandardGate::RZZ(theta.clone()), a, b)?,
                single(StandardGate::Rx(c(FRAC_PI_2)), a)?,
                single(StandardGate::Rx(c(FRAC_PI_2)), b)?,
            ])
        }

        // Toffoli, the standard T-depth circuit.
        StandardGate::CCX => {
            let (a, b, t) = (qubits[0], qubits[1], qubits[2]);
            Ok(vec![
                single(StandardGate::H, t)?,
                two(StandardGate::CX, b, t)?,
                single(StandardGate::Tdg, t)?,
                two(StandardGate::CX, a, t)?,
                single(StandardGate::T, t)?,
                two(StandardGate::CX, b, t)?,
                single(StandardGate::Tdg, t)?,
                two(StandardGate::CX, a, t)?,
                single(StandardGate::T, b)?,
                single(StandardGate::T, t)?,
                single(StandardGate::H, t)?,
                two(StandardGate::CX, a, b)?,
                single(StandardGate::T, a)?,
                single(StandardGate::Tdg, b)?,
                two(StandardGate::CX, a, b)?,
            ])
        }

        // CSWAP = CX·CCX·CX
        StandardGate::CSwap => {
            let (cq, a, b) = (qubits[0], qubits[1], qubits[2]);
            Ok(vec![
                two(StandardGate::CX, b, a)?,
                Instruction::gate(StandardGate::CCX, [cq, a, b])?,
                two(StandardGate::CX, b, a)?,
            ])
        }

        other => Err(IrError::NoDecomposition(other.name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DenseMatrix;
    use crate::wire::BitString;

    /// Compose the unitary of a two-qubit gate sequence (big-endian wire
    /// order: q0 is the most significant bit).
    fn compose_two_qubit(instructions: &[Instruction]) -> DenseMatrix {
        let mut total = DenseMatrix::identity(2);
        for inst in instructions {
            let m = inst.operation().matrix().unwrap();
            let full = match (m.num_qubits(), inst.qubits()) {
                (2, [a, b]) if a.0 == 0 && b.0 == 1 => m,
                (1, [q]) if q.0 == 0 => m.kron(&DenseMatrix::identity(1)),
                (1, [q]) if q.0 == 1 => DenseMatrix::identity(1).kron(&m),
                other => panic!("unexpected wire layout {other:?}"),
            };
            total = full.mul(&total);
        }
        total
    }

    fn check_two_qubit_equivalence(gate: StandardGate) {
        let inst = Instruction::two_qubit_gate(gate.clone(), QubitId(0), QubitId(1)).unwrap();
        let expected = gate.matrix().unwrap();
        let got = compose_two_qubit(&inst.decompose().unwrap());
        assert!(
            got.approx_eq_up_to_phase(&expected, 1e-9),
            "decomposition of {} does not reproduce its unitary",
            gate.name()
        );
    }

    #[test]
    fn test_two_qubit_gate_decompositions_are_exact() {
        check_two_qubit_equivalence(StandardGate::CY);
        check_two_qubit_equivalence(StandardGate::CZ);
        check_two_qubit_equivalence(StandardGate::CH);
        check_two_qubit_equivalence(StandardGate::CS);
        check_two_qubit_equivalence(StandardGate::Swap);
        check_two_qubit_equivalence(StandardGate::CP(ParameterExpression::constant(0.7)));
        check_two_qubit_equivalence(StandardGate::CRz(ParameterExpression::constant(1.3)));
        check_two_qubit_equivalence(StandardGate::CRx(ParameterExpression::constant(-0.4)));
        check_two_qubit_equivalence(StandardGate::CRy(ParameterExpression::constant(2.1)));
        check_two_qubit_equivalence(StandardGate::RZZ(ParameterExpression::constant(0.9)));
        check_two_qubit_equivalence(StandardGate::RXX(ParameterExpression::constant(0.9)));
        check_two_qubit_equivalence(StandardGate::RYY(ParameterExpression::constant(0.9)));
    }

    #[test]
    fn test_u_gate_decomposition_is_exact() {
        let gate = StandardGate::U(
            ParameterExpression::constant(0.5),
            ParameterExpression::constant(1.1),
            ParameterExpression::constant(-0.3),
        );
        let inst = Instruction::single_qubit_gate(gate.clone(), QubitId(0)).unwrap();
        let mut total = DenseMatrix::identity(1);
        for piece in inst.decompose().unwrap() {
            total = piece.operation().matrix().unwrap().mul(&total);
        }
        assert!(total.approx_eq(&gate.matrix().unwrap(), 1e-9));
    }

    #[test]
    fn test_controlled_unitary_zyz_is_exact() {
        // Control(T) has no native form and goes through the ZYZ path.
        let op = Operation::control(1, Operation::Gate(StandardGate::T));
        let inst = Instruction::new(op.clone(), [QubitId(0), QubitId(1)], [], []).unwrap();
        let expected = op.matrix().unwrap();
        let got = compose_two_qubit(&inst.decompose().unwrap());
        assert!(got.approx_eq_up_to_phase(&expected, 1e-9));
    }

    #[test]
    fn test_controlled_gate_maps_to_native_form() {
        let op = Operation::control(1, Operation::Gate(StandardGate::X));
        let inst = Instruction::new(op, [QubitId(0), QubitId(1)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name(), "cx");
    }

    #[test]
    fn test_multi_controlled_emits_two_level_construction() {
        let op = Operation::control(2, Operation::Gate(StandardGate::T));
        let inst =
            Instruction::new(op, [QubitId(0), QubitId(1), QubitId(2)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 5);
        // Every emitted piece stays on the original wire set.
        for piece in &out {
            for q in piece.qubits() {
                assert!(q.0 <= 2);
            }
        }
    }

    #[test]
    fn test_power_unrolls() {
        let op = Operation::power(Operation::Gate(StandardGate::X), 3.0);
        let inst = Instruction::new(op, [QubitId(0)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|i| i.name() == "x"));
    }

    #[test]
    fn test_negative_power_inverts() {
        let op = Operation::power(Operation::Gate(StandardGate::S), -2.0);
        let inst = Instruction::new(op, [QubitId(0)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.kind() == crate::operation::OpKind::Inverse));
    }

    #[test]
    fn test_non_integer_power_is_rejected() {
        let op = Operation::power(Operation::Gate(StandardGate::Z), 0.5);
        let inst = Instruction::new(op, [QubitId(0)], [], []).unwrap();
        assert!(matches!(
            inst.decompose(),
            Err(IrError::NonIntegerPower { .. })
        ));
    }

    #[test]
    fn test_inverse_of_gate() {
        let op = Operation::inverse(Operation::Gate(StandardGate::S));
        let inst = Instruction::new(op, [QubitId(0)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name(), "sdg");
    }

    #[test]
    fn test_block_remaps_wires() {
        let body = vec![
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)).unwrap(),
            Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)).unwrap(),
            Instruction::measure(QubitId(1), BitId(0)).unwrap(),
        ];
        let block = Operation::Block {
            num_qubits: 2,
            num_bits: 1,
            num_zvars: 0,
            body,
        };
        let inst =
            Instruction::new(block, [QubitId(4), QubitId(5)], [BitId(3)], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].qubits(), &[QubitId(4)]);
        assert_eq!(out[1].qubits(), &[QubitId(4), QubitId(5)]);
        assert_eq!(out[2].qubits(), &[QubitId(5)]);
        assert_eq!(out[2].bits(), &[BitId(3)]);
    }

    #[test]
    fn test_repeat_unrolls_on_same_wires() {
        let op = Operation::repeat(3, Operation::Gate(StandardGate::X));
        let inst = Instruction::new(op, [QubitId(2)], [], []).unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|i| i.qubits() == [QubitId(2)]));
    }

    #[test]
    fn test_if_statement_guards_every_piece() {
        let cond = BitString::parse("11").unwrap();
        let op = Operation::if_statement(
            Operation::Gate(StandardGate::Swap),
            cond.clone(),
        );
        let inst = Instruction::new(
            op,
            [QubitId(0), QubitId(1)],
            [BitId(0), BitId(1)],
            [],
        )
        .unwrap();
        let out = inst.decompose().unwrap();
        assert_eq!(out.len(), 3);
        for piece in &out {
            assert!(matches!(
                piece.operation(),
                Operation::IfStatement { condition, .. } if *condition == cond
            ));
            assert_eq!(piece.bits(), &[BitId(0), BitId(1)]);
        }
    }

    #[test]
    fn test_measure_has_no_decomposition() {
        let inst = Instruction::measure(QubitId(0), BitId(0)).unwrap();
        assert!(matches!(
            inst.decompose(),
            Err(IrError::NoDecomposition(_))
        ));
    }
}
