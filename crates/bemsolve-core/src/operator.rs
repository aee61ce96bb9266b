//! Matrix-free linear operators consumed by the iterative solvers.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// A square real-valued linear operator.
///
/// This is the numeric form of a boundary operator: the solvers only ever
/// see `y = A * x` products, never the matrix itself.
pub trait RealOperator: Send + Sync {
    /// Number of rows (and columns).
    fn dim(&self) -> usize;

    /// Compute `y = A * x`.
    fn apply(&self, x: &[f64], y: &mut [f64]);
}

/// Dense real operator backed by an nalgebra matrix.
#[derive(Debug, Clone)]
pub struct DenseRealOperator {
    matrix: DMatrix<f64>,
}

impl DenseRealOperator {
    /// Wrap an existing matrix. The matrix must be square.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(Error::NotSquare {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            });
        }
        Ok(Self { matrix })
    }

    /// Build from row vectors.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Error::NotSquare {
                rows: n,
                cols: row.len(),
            });
        }
        Self::from_matrix(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
    }
}

impl RealOperator for DenseRealOperator {
    fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        let n = self.matrix.nrows();
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), n);

        let ax = &self.matrix * DVector::from_column_slice(x);
        y.copy_from_slice(ax.as_slice());
    }
}

/// Diagonal operator, `y[i] = d[i] * x[i]`.
///
/// Lumped mass matrices and identity operators take this form.
#[derive(Debug, Clone)]
pub struct DiagonalOperator {
    diag: Vec<f64>,
}

impl DiagonalOperator {
    pub fn new(diag: Vec<f64>) -> Self {
        Self { diag }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self { diag: vec![1.0; n] }
    }
}

impl RealOperator for DiagonalOperator {
    fn dim(&self) -> usize {
        self.diag.len()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.diag.len());
        assert_eq!(y.len(), self.diag.len());

        for ((yi, &xi), &di) in y.iter_mut().zip(x).zip(&self.diag) {
            *yi = di * xi;
        }
    }
}
