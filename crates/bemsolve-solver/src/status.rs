//! Solver termination status.

use std::fmt;

/// How an iterative solve terminated.
///
/// Mirrors the integer status convention of classic Krylov codes through
/// [`code`](Self::code): `0` converged, positive when the iteration limit
/// was reached, negative on breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Relative residual dropped below the tolerance.
    Converged,
    /// Iteration limit reached before convergence.
    MaxIterations { iterations: usize },
    /// The iteration could not continue (non-finite values, or a CG search
    /// direction with non-positive curvature).
    Breakdown,
}

impl SolveStatus {
    /// Integer status code.
    pub fn code(&self) -> i32 {
        match self {
            SolveStatus::Converged => 0,
            SolveStatus::MaxIterations { iterations } => {
                i32::try_from(*iterations).unwrap_or(i32::MAX).max(1)
            }
            SolveStatus::Breakdown => -1,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Converged => write!(f, "converged"),
            SolveStatus::MaxIterations { iterations } => {
                write!(f, "not converged after {} iterations", iterations)
            }
            SolveStatus::Breakdown => write!(f, "breakdown"),
        }
    }
}
