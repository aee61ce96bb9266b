//! Vector kernels and Givens rotations shared by the Krylov solvers.

/// Dot product of two real vectors.
pub fn real_dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(ai, bi)| ai * bi).sum()
}

/// Compute the 2-norm of a real vector.
pub fn real_vec_norm(v: &[f64]) -> f64 {
    real_dot_product(v, v).sqrt()
}

/// `y += alpha * x`
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    debug_assert_eq!(x.len(), y.len());
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// Compute Givens rotation coefficients for real values.
///
/// Returns (c, s) such that:
/// ```text
/// [ c  s ] [ a ]   [ r ]
/// [-s  c ] [ b ] = [ 0 ]
/// ```
pub fn real_givens_rotation(a: f64, b: f64) -> (f64, f64) {
    if b.abs() < 1e-30 {
        return (1.0, 0.0);
    }
    let r = a.hypot(b);
    (a / r, b / r)
}
