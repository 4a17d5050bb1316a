//! Sleipnir Circuit Intermediate Representation
//!
//! This crate provides the data structures for representing quantum
//! circuits in Sleipnir: the closed operation vocabulary, instructions
//! binding operations to wires, and ordered circuits.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s; each instruction
//! binds one [`Operation`] to wires in three disjoint address spaces
//! ([`QubitId`], [`BitId`], [`ZVarId`]). The operation vocabulary covers
//! primitive gates, arbitrary-matrix gates, composite modifiers (power,
//! inverse, control), structural containers (block, repeat, if-statement),
//! measurement and reset, noise channels, observables and annotations,
//! and classical z-register arithmetic.
//!
//! Instructions are immutable once constructed, and construction validates
//! the wire binding against the operation's fixed arity. Every expandable
//! operation kind carries its decomposition rule
//! ([`Instruction::decompose`]); the lowering pass in `sleipnir-lower`
//! drives those rules recursively.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use sleipnir_ir::{Circuit, QubitId, BitId};
//!
//! let mut circuit = Circuit::new("bell");
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), BitId(0)).unwrap();
//! circuit.measure(QubitId(1), BitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 4);
//! ```
//!
//! # Example: Composite Modifiers
//!
//! ```rust
//! use sleipnir_ir::{Instruction, Operation, QubitId, StandardGate};
//!
//! // A controlled-Hadamard built from modifiers rather than the native CH.
//! let op = Operation::control(1, Operation::Gate(StandardGate::H));
//! let inst = Instruction::new(op, [QubitId(0), QubitId(1)], [], []).unwrap();
//!
//! // Its decomposition stays on the same wires.
//! for piece in inst.decompose().unwrap() {
//!     assert!(piece.qubits().iter().all(|q| q.0 <= 1));
//! }
//! ```

pub mod circuit;
pub mod decompose;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod matrix;
pub mod noise;
pub mod observable;
pub mod operation;
pub mod parameter;
pub mod wire;

pub use circuit::{Circuit, WireUsage};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, GateCall, GateDecl, StandardGate};
pub use instruction::Instruction;
pub use matrix::{DenseMatrix, Matrix2};
pub use noise::{NoiseChannel, ProjectiveBasis};
pub use observable::{HamiltonianTerm, Pauli, PauliString};
pub use operation::{OpKind, Operation};
pub use parameter::{ParamOp, ParameterExpression};
pub use wire::{BitId, BitString, QubitId, ZVarId};
