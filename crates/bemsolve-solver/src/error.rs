//! Error types for bemsolve-solver.

use thiserror::Error;

/// Errors raised by the iterative solve adapters.
///
/// Non-convergence and numerical breakdown are not errors: they are reported
/// through [`SolveStatus`](crate::SolveStatus) alongside the solution.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument violates its contract. Raised before any numeric work.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The weak form or projected right-hand side does not match the spaces.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Error from bemsolve-core.
    #[error("Core error: {0}")]
    Core(#[from] bemsolve_core::Error),
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;
