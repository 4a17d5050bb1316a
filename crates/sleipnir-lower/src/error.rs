//! Error types for the lowering crate.

use thiserror::Error;

use sleipnir_ir::IrError;

/// Errors that can occur during lowering.
///
/// Lowering is all-or-nothing: any of these aborts the whole call and no
/// partially-lowered circuit is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LowerError {
    /// The operation has no statevector realization and no decomposition.
    #[error("Unsupported operation '{name}': {reason}")]
    UnsupportedOperation {
        /// Name of the offending operation.
        name: String,
        /// Why the operation cannot run on the engine.
        reason: String,
    },

    /// Wrapper unwrapping exceeded the modifier-depth bound. A chain this
    /// deep means the operation graph is malformed.
    #[error("Modifier chain exceeded depth {depth}; operation graph is malformed")]
    CycleDetected {
        /// The depth at which the walk was aborted.
        depth: usize,
    },

    /// Recursive decomposition did not reach native operations within the
    /// configured depth bound.
    #[error("Decomposition of '{name}' did not converge within depth {max_depth}")]
    DecompositionDiverged {
        /// Name of the instruction being expanded.
        name: String,
        /// The configured recursion bound.
        max_depth: usize,
    },

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for lowering operations.
pub type LowerResult<T> = Result<T, LowerError>;
