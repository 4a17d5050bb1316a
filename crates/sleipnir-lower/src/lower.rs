//! The recursive circuit-lowering pass.

use tracing::{debug, instrument, trace};

use sleipnir_ir::{Circuit, CustomGate, Instruction, IrError, Operation};

use crate::capability::{CapabilitySet, SupportVerdict};
use crate::error::{LowerError, LowerResult};

/// Default bound on recursive decomposition depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// The lowering engine.
///
/// Rewrites a circuit so every leaf is executable by the engine described
/// by the capability set: native operations pass through unchanged,
/// unsupported unitaries of at most two qubits collapse to a dense-matrix
/// gate with the same operator, and everything else is decomposed and
/// re-lowered recursively.
///
/// Lowering is pure: the input circuit is never mutated, the capability
/// set is never changed, and the same input always produces the same
/// output.
pub struct Lowering {
    caps: CapabilitySet,
    max_depth: usize,
}

impl Lowering {
    /// Create a lowering engine for the given capability set.
    pub fn new(caps: CapabilitySet) -> Self {
        Self {
            caps,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the recursion depth bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The capability set this engine lowers toward.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    /// Lower a circuit instruction-wise, concatenating results in input
    /// order.
    ///
    /// All-or-nothing: the first structurally unsupported operation
    /// aborts the whole call and no partial circuit is returned.
    #[instrument(skip_all, fields(circuit = circuit.name(), instructions = circuit.len()))]
    pub fn lower(&self, circuit: &Circuit) -> LowerResult<Circuit> {
        let mut out = Circuit::new(circuit.name());
        for instruction in circuit {
            self.lower_instruction(instruction, &mut out, 0)?;
        }
        debug!(
            input = circuit.len(),
            output = out.len(),
            "lowering complete"
        );
        Ok(out)
    }

    fn lower_instruction(
        &self,
        instruction: &Instruction,
        out: &mut Circuit,
        depth: usize,
    ) -> LowerResult<()> {
        if depth > self.max_depth {
            return Err(LowerError::DecompositionDiverged {
                name: instruction.name().to_string(),
                max_depth: self.max_depth,
            });
        }

        match self.caps.classify(instruction.operation())? {
            SupportVerdict::Unsupported { reason } => Err(LowerError::UnsupportedOperation {
                name: instruction.name().to_string(),
                reason,
            }),

            SupportVerdict::Supported => {
                if self.operation_is_native(instruction.operation())? {
                    out.push(instruction.clone());
                    return Ok(());
                }
                self.lower_non_native(instruction, out, depth)
            }

            SupportVerdict::NeedsDecomposition => {
                // Unsupported unitary on at most two qubits: emit a
                // dense-matrix gate with the exact same operator,
                // discarding the symbolic identity.
                let op = instruction.operation();
                if op.is_unitary_gate() && op.num_qubits() <= 2 {
                    if let Some(matrix) = op.matrix() {
                        trace!(name = instruction.name(), "dense-matrix fallback");
                        let fallback =
                            Operation::Custom(CustomGate::from_matrix(instruction.name(), matrix));
                        out.push(Instruction::new(
                            fallback,
                            instruction.qubits().iter().copied(),
                            [],
                            [],
                        )?);
                        return Ok(());
                    }
                }
                self.lower_non_native(instruction, out, depth)
            }
        }
    }

    /// Lower an instruction whose leaves are not yet native. Blocks keep
    /// their shape with the body lowered in place, guarded operations
    /// re-guard their lowered pieces, everything else expands through its
    /// decomposition rule.
    fn lower_non_native(
        &self,
        instruction: &Instruction,
        out: &mut Circuit,
        depth: usize,
    ) -> LowerResult<()> {
        match instruction.operation() {
            Operation::Block {
                num_qubits,
                num_bits,
                num_zvars,
                body,
            } => {
                let mut lowered = Circuit::new("block");
                for piece in body {
                    self.lower_instruction(piece, &mut lowered, depth + 1)?;
                }
                let rebuilt = Operation::Block {
                    num_qubits: *num_qubits,
                    num_bits: *num_bits,
                    num_zvars: *num_zvars,
                    body: lowered.instructions().to_vec(),
                };
                out.push(instruction.with_operation(rebuilt)?);
                Ok(())
            }

            Operation::IfStatement { base, condition } => {
                let width = condition.width();
                let inner = Instruction::new(
                    base.as_ref().clone(),
                    instruction.qubits().iter().copied(),
                    instruction.bits()[width..].iter().copied(),
                    instruction.zvars().iter().copied(),
                )?;
                let mut lowered = Circuit::new("if");
                self.lower_instruction(&inner, &mut lowered, depth + 1)?;
                for piece in lowered.instructions() {
                    let mut bits = instruction.bits()[..width].to_vec();
                    bits.extend_from_slice(piece.bits());
                    out.push(Instruction::new(
                        Operation::if_statement(piece.operation().clone(), condition.clone()),
                        piece.qubits().iter().copied(),
                        bits,
                        piece.zvars().iter().copied(),
                    )?);
                }
                Ok(())
            }

            _ => self.expand(instruction, out, depth),
        }
    }

    /// Decompose one instruction and recursively lower the pieces.
    fn expand(&self, instruction: &Instruction, out: &mut Circuit, depth: usize) -> LowerResult<()> {
        trace!(name = instruction.name(), depth, "decomposing");
        let pieces = instruction.decompose().map_err(|err| match err {
            IrError::NoDecomposition(name) => LowerError::UnsupportedOperation {
                name,
                reason: "no decomposition rule reaches the native instruction set".into(),
            },
            IrError::NonIntegerPower { name, exponent } => LowerError::UnsupportedOperation {
                name,
                reason: format!("non-integer power {exponent} has no symbolic expansion"),
            },
            other => LowerError::Ir(other),
        })?;
        for piece in pieces {
            self.lower_instruction(&piece, out, depth + 1)?;
        }
        Ok(())
    }

    /// Check that an operation, including any container body, consists
    /// only of natively supported operations.
    fn operation_is_native(&self, op: &Operation) -> LowerResult<bool> {
        if !self.caps.classify(op)?.is_supported() {
            return Ok(false);
        }
        match op {
            Operation::Block { body, .. } => {
                for piece in body {
                    if !self.operation_is_native(piece.operation())? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Operation::Call(call) => {
                for piece in &call.decl.body {
                    if !self.operation_is_native(piece.operation())? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Operation::Repeat { base, .. } | Operation::IfStatement { base, .. } => {
                self.operation_is_native(base)
            }
            _ => Ok(true),
        }
    }
}
