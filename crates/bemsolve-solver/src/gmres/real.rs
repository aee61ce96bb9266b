//! Real-valued GMRES solver.

use bemsolve_core::RealOperator;

use super::GmresConfig;
use super::helpers::{axpy, real_dot_product, real_givens_rotation, real_vec_norm};
use crate::monitor::IterationMonitor;
use crate::status::SolveStatus;

/// Result of a real-valued GMRES solve.
#[derive(Debug, Clone)]
pub struct RealGmresResult {
    /// Solution vector.
    pub x: Vec<f64>,
    /// Number of inner iterations performed.
    pub iterations: usize,
    /// Final relative residual.
    pub residual: f64,
    /// How the iteration terminated.
    pub status: SolveStatus,
}

impl RealGmresResult {
    fn new(x: Vec<f64>, iterations: usize, residual: f64, status: SolveStatus) -> Self {
        Self {
            x,
            iterations,
            residual,
            status,
        }
    }
}

/// Solve A*x = b using restarted GMRES for real-valued systems.
///
/// Starts from a zero initial guess. The monitor is notified once per inner
/// (Arnoldi) iteration with the rotated residual estimate, and the iteration
/// cap counts inner iterations across all restart cycles.
///
/// The true residual is recomputed at every restart; convergence is judged
/// on `||b - A*x|| / ||b|| < tol`.
pub fn solve_gmres_real(
    op: &dyn RealOperator,
    b: &[f64],
    config: &GmresConfig,
    monitor: &mut dyn IterationMonitor,
) -> RealGmresResult {
    let n = op.dim();
    assert_eq!(b.len(), n, "RHS dimension mismatch");

    let b_norm = real_vec_norm(b);
    if b_norm < 1e-30 {
        return RealGmresResult::new(vec![0.0; n], 0, 0.0, SolveStatus::Converged);
    }

    let max_iter = config.max_iterations(n);
    let m = config.restart_length(n);

    let mut x = vec![0.0; n];
    let mut total_iter = 0;

    loop {
        // Compute residual r = b - A*x
        let mut r = vec![0.0; n];
        op.apply(&x, &mut r);
        for (ri, &bi) in r.iter_mut().zip(b) {
            *ri = bi - *ri;
        }
        let r_norm = real_vec_norm(&r);
        let rel_res = r_norm / b_norm;

        if !rel_res.is_finite() {
            return RealGmresResult::new(x, total_iter, rel_res, SolveStatus::Breakdown);
        }
        if rel_res < config.tol {
            return RealGmresResult::new(x, total_iter, rel_res, SolveStatus::Converged);
        }
        if total_iter >= max_iter {
            let status = SolveStatus::MaxIterations {
                iterations: total_iter,
            };
            return RealGmresResult::new(x, total_iter, rel_res, status);
        }

        // Arnoldi process with modified Gram-Schmidt
        let mut v: Vec<Vec<f64>> = Vec::with_capacity(m + 1);
        let mut h = vec![vec![0.0; m + 1]; m];

        // v[0] = r / ||r||
        let inv_r_norm = 1.0 / r_norm;
        for ri in r.iter_mut() {
            *ri *= inv_r_norm;
        }
        v.push(r);

        // g = ||r|| * e_1
        let mut g = vec![0.0; m + 1];
        g[0] = r_norm;

        // Givens rotation storage
        let mut cs = vec![0.0; m];
        let mut sn = vec![0.0; m];

        let mut k = 0;
        while k < m && total_iter < max_iter {
            total_iter += 1;

            // w = A * v[k]
            let mut w = vec![0.0; n];
            op.apply(&v[k], &mut w);

            // Modified Gram-Schmidt
            for j in 0..=k {
                let hij = real_dot_product(&v[j], &w);
                h[k][j] = hij;
                axpy(-hij, &v[j], &mut w);
            }

            let w_norm = real_vec_norm(&w);
            h[k][k + 1] = w_norm;

            // Lucky breakdown: the Krylov space is invariant and the
            // least-squares solution below is exact.
            let invariant = w_norm < 1e-30;
            if !invariant {
                let inv_w = 1.0 / w_norm;
                w.iter_mut().for_each(|wi| *wi *= inv_w);
                v.push(w);
            }

            // Apply previous Givens rotations to h[k]
            for j in 0..k {
                let temp = cs[j] * h[k][j] + sn[j] * h[k][j + 1];
                h[k][j + 1] = -sn[j] * h[k][j] + cs[j] * h[k][j + 1];
                h[k][j] = temp;
            }

            // Compute new Givens rotation
            let (c, s) = real_givens_rotation(h[k][k], h[k][k + 1]);
            cs[k] = c;
            sn[k] = s;

            h[k][k] = c * h[k][k] + s * h[k][k + 1];
            h[k][k + 1] = 0.0;

            let temp_g = c * g[k] + s * g[k + 1];
            g[k + 1] = -s * g[k] + c * g[k + 1];
            g[k] = temp_g;

            let estimate = g[k + 1].abs() / b_norm;
            monitor.on_iteration(estimate);
            k += 1;

            if invariant || estimate < config.tol || !estimate.is_finite() {
                break;
            }
        }

        // Back-substitution to find y from H*y = g
        let mut y = vec![0.0; k];
        for i in (0..k).rev() {
            let mut sum = g[i];
            for j in (i + 1)..k {
                sum -= h[j][i] * y[j];
            }
            if h[i][i].abs() > 1e-30 {
                y[i] = sum / h[i][i];
            }
        }

        // Update x = x + V * y
        for (vi, &yi) in v.iter().zip(&y) {
            axpy(yi, vi, &mut x);
        }
    }
}
