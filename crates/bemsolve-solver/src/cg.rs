//! Conjugate Gradient solver for symmetric positive-definite systems.

use bemsolve_core::RealOperator;

use crate::gmres::helpers::{axpy, real_dot_product, real_vec_norm};
use crate::monitor::IterationMonitor;
use crate::status::SolveStatus;

/// CG solver configuration.
#[derive(Debug, Clone)]
pub struct CgConfig {
    /// Maximum number of iterations. `None` means `10 * n`.
    pub max_iter: Option<usize>,
    /// Convergence tolerance (relative residual).
    pub tol: f64,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iter: None,
            tol: 1e-5,
        }
    }
}

impl CgConfig {
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
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
}

/// Result of a CG solve.
#[derive(Debug, Clone)]
pub struct CgResult {
    /// Solution vector.
    pub x: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Final relative residual (recursively updated).
    pub residual: f64,
    /// How the iteration terminated.
    pub status: SolveStatus,
}

/// Solve A*x = b with the Conjugate Gradient method.
///
/// `op` must be symmetric positive definite. A search direction with
/// non-positive curvature `p^T A p` ends the iteration with
/// [`SolveStatus::Breakdown`].
pub fn solve_cg(
    op: &dyn RealOperator,
    b: &[f64],
    config: &CgConfig,
    monitor: &mut dyn IterationMonitor,
) -> CgResult {
    let n = op.dim();
    assert_eq!(b.len(), n, "RHS dimension mismatch");

    let mut x = vec![0.0; n];

    let b_norm = real_vec_norm(b);
    if b_norm < 1e-30 {
        return CgResult {
            x,
            iterations: 0,
            residual: 0.0,
            status: SolveStatus::Converged,
        };
    }

    let max_iter = config.max_iterations(n);

    // x0 = 0, so r0 = b
    let mut r = b.to_vec();
    let mut p = r.clone();
    let mut ap = vec![0.0; n];
    let mut rs_old = real_dot_product(&r, &r);
    let mut iterations = 0;

    let status = loop {
        let rel_res = rs_old.sqrt() / b_norm;
        if !rel_res.is_finite() {
            break SolveStatus::Breakdown;
        }
        if rel_res < config.tol {
            break SolveStatus::Converged;
        }
        if iterations >= max_iter {
            break SolveStatus::MaxIterations { iterations };
        }

        op.apply(&p, &mut ap);
        let pap = real_dot_product(&p, &ap);
        if pap.is_nan() || pap <= 0.0 {
            break SolveStatus::Breakdown;
        }

        let alpha = rs_old / pap;
        axpy(alpha, &p, &mut x);
        axpy(-alpha, &ap, &mut r);

        let rs_new = real_dot_product(&r, &r);
        iterations += 1;
        monitor.on_iteration(rs_new.sqrt() / b_norm);

        // p = r + beta * p
        let beta = rs_new / rs_old;
        for (pi, &ri) in p.iter_mut().zip(&r) {
            *pi = ri + beta * *pi;
        }
        rs_old = rs_new;
    };

    CgResult {
        x,
        iterations,
        residual: rs_old.sqrt() / b_norm,
        status,
    }
}
