//! Error types for the HAL crate.

use std::time::Duration;

use thiserror::Error;

use sleipnir_lower::LowerError;

/// Errors that can occur at the engine boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Circuit interchange failed; the underlying cause is attached, not
    /// swallowed.
    #[error("Conversion failed: {context}")]
    Conversion {
        /// What was being converted when the failure occurred.
        context: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lowering failed before the circuit reached the boundary.
    #[error("Lowering failed: {0}")]
    Lower(#[from] LowerError),

    /// The engine reported a failure.
    #[error("Engine execution failed: {0}")]
    EngineFailed(String),

    /// Execution exceeded the configured time limit.
    #[error("Execution timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid sample count.
    #[error("Invalid sample count: {0}")]
    InvalidSamples(String),

    /// The engine does not support a requested feature.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl HalError {
    /// Build a conversion error with an attached cause.
    pub fn conversion(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        HalError::Conversion {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a conversion error describing a contract violation with no
    /// deeper cause.
    pub fn mismatch(context: impl Into<String>) -> Self {
        HalError::Conversion {
            context: context.into(),
            source: None,
        }
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
