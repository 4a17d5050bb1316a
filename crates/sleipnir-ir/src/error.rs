//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operation bound to the wrong number of wires.
    #[error(
        "Operation '{name}' requires {expected} {space} wires, got {got}"
    )]
    ArityMismatch {
        /// Name of the operation.
        name: String,
        /// Wire address space ("qubit", "bit" or "zvar").
        space: &'static str,
        /// Expected number of wires.
        expected: usize,
        /// Actual number of wires provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit q{qubit} in operation '{name}'")]
    DuplicateQubit {
        /// The duplicate qubit index.
        qubit: u32,
        /// Name of the operation.
        name: String,
    },

    /// Body wire index out of range for the enclosing container.
    #[error("Wire index {index} out of range for '{name}' ({space} arity {arity})")]
    WireOutOfRange {
        /// The out-of-range local index.
        index: usize,
        /// Name of the container operation.
        name: String,
        /// Wire address space.
        space: &'static str,
        /// Declared arity of the container.
        arity: usize,
    },

    /// Operation kind has no decomposition rule.
    #[error("Operation '{0}' has no decomposition")]
    NoDecomposition(String),

    /// Power modifier with a non-integer exponent cannot be expanded.
    #[error("Power of '{name}' with non-integer exponent {exponent} cannot be expanded")]
    NonIntegerPower {
        /// Name of the base operation.
        name: String,
        /// The offending exponent.
        exponent: f64,
    },

    /// Matrix has the wrong dimension for its qubit count.
    #[error("Matrix of length {len} does not match {num_qubits}-qubit operation '{name}'")]
    InvalidMatrix {
        /// Element count of the provided matrix.
        len: usize,
        /// Declared qubit count.
        num_qubits: usize,
        /// Name of the operation.
        name: String,
    },

    /// Parameter is still symbolic where a concrete value is required.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
