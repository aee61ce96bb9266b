//! Restarted GMRES for real-valued systems.
//!
//! # Usage
//!
//! ```ignore
//! use bemsolve_solver::{GmresConfig, IterationCounter, solve_gmres_real};
//!
//! let mut counter = IterationCounter::new();
//! let result = solve_gmres_real(&operator, &rhs, &GmresConfig::default(), &mut counter);
//! ```
//!
//! # Module Structure
//!
//! - [`real`] - Real-valued GMRES solver
//! - [`helpers`] - Givens rotation and vector norm utilities

pub mod helpers;
pub mod real;

pub use real::{RealGmresResult, solve_gmres_real};

/// Restart length used when none is configured.
pub const DEFAULT_RESTART: usize = 20;

/// GMRES solver configuration.
#[derive(Debug, Clone)]
pub struct GmresConfig {
    /// Maximum number of inner iterations. `None` means `10 * n`.
    pub max_iter: Option<usize>,
    /// Convergence tolerance (relative residual).
    pub tol: f64,
    /// Krylov subspace dimension before restart. `None` means
    /// [`DEFAULT_RESTART`].
    pub restart: Option<usize>,
}

impl Default for GmresConfig {
    fn default() -> Self {
        Self {
            max_iter: None,
            tol: 1e-5,
            restart: None,
        }
    }
}

impl GmresConfig {
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_restart(mut self, restart: usize) -> Self {
        self.restart = Some(restart);
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Effective iteration cap for a system of size `n`.
    pub fn max_iterations(&self, n: usize) -> usize {
        self.max_iter.unwrap_or(10 * n)
    }

    /// Effective restart length for a system of size `n`.
    pub fn restart_length(&self, n: usize) -> usize {
        self.restart.unwrap_or(DEFAULT_RESTART).min(n).max(1)
    }
}
