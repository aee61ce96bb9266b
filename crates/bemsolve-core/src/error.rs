//! Error types for bemsolve-core.

use thiserror::Error;

/// Errors raised while building spaces, grid functions and operators.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector or matrix does not have the size its space requires.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A matrix that must be square is not.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A lumped mass weight is zero, negative or not finite.
    #[error("Invalid mass weight {weight} at DOF {dof}")]
    InvalidMassWeight { dof: usize, weight: f64 },

    /// Sparse matrix construction failed.
    #[error("Invalid sparse matrix: {0}")]
    InvalidSparse(String),
}

/// Result type for bemsolve-core operations.
pub type Result<T> = std::result::Result<T, Error>;
