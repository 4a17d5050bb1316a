//! Sleipnir Circuit Lowering
//!
//! This crate decides which operations the local statevector engine can
//! execute natively and rewrites circuits so every leaf is
//! engine-executable.
//!
//! # Overview
//!
//! Three pieces cooperate:
//!
//! - [`CapabilitySet`]: the immutable set of natively executable
//!   operation kinds, built once at engine construction.
//! - The wrapper resolver ([`resolver::unwrap_base`]): strips composite
//!   modifiers (power, inverse, control) to find an operation's base for
//!   classification purposes only.
//! - [`Lowering`]: the recursive rewrite pass. Per instruction, in input
//!   order: a supported operation passes through unchanged; an
//!   unsupported unitary of at most two qubits collapses to a
//!   dense-matrix gate with the identical operator; anything else is
//!   decomposed via the operation model's own rules and re-lowered.
//!
//! Structurally unsupported operations (tensor-network diagnostics,
//! oracles, oversized expectation values and matrix gates) abort the
//! whole call; lowering is all-or-nothing and never drops or substitutes
//! an operation silently.
//!
//! # Example
//!
//! ```rust
//! use sleipnir_ir::{Circuit, Instruction, Operation, QubitId, StandardGate};
//! use sleipnir_lower::{CapabilitySet, Lowering};
//!
//! // H is native; Control(H) is a composite modifier and is not.
//! let mut circuit = Circuit::new("example");
//! circuit.h(QubitId(0)).unwrap();
//! circuit
//!     .push_op(
//!         Operation::control(1, Operation::Gate(StandardGate::H)),
//!         [QubitId(0), QubitId(1)],
//!         [],
//!         [],
//!     )
//!     .unwrap();
//!
//! let lowering = Lowering::new(CapabilitySet::statevector());
//! let lowered = lowering.lower(&circuit).unwrap();
//!
//! // Order is preserved and every leaf is engine-executable.
//! assert_eq!(lowered.instructions()[0].name(), "h");
//! ```

pub mod capability;
pub mod error;
pub mod lower;
pub mod resolver;

pub use capability::{CapabilitySet, SupportVerdict};
pub use error::{LowerError, LowerResult};
pub use lower::{DEFAULT_MAX_DEPTH, Lowering};
pub use resolver::{MAX_WRAPPER_DEPTH, unwrap_base};
