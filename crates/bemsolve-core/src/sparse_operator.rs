//! Sparse weak-form operators.
//!
//! Wraps faer's compressed sparse column matrices so that assembled sparse
//! weak forms (mass matrices, near-field blocks) can be handed to the
//! iterative solvers through [`RealOperator`].

use faer::sparse::{SparseColMat, Triplet};

use crate::error::{Error, Result};
use crate::operator::RealOperator;

/// Sparse real-valued operator for iterative solvers.
pub struct SparseRealOperator {
    matrix: SparseColMat<usize, f64>,
}

impl SparseRealOperator {
    /// Create from triplets (row, col, value).
    ///
    /// Duplicate entries at the same position are summed.
    pub fn from_triplets(size: usize, triplets: &[(usize, usize, f64)]) -> Result<Self> {
        if let Some(&(r, c, _)) = triplets.iter().find(|&&(r, c, _)| r >= size || c >= size) {
            return Err(Error::InvalidSparse(format!(
                "entry ({}, {}) out of bounds for {}x{} matrix",
                r, c, size, size
            )));
        }

        let faer_triplets: Vec<_> = triplets
            .iter()
            .map(|&(r, c, v)| Triplet::new(r, c, v))
            .collect();

        SparseColMat::<usize, f64>::try_new_from_triplets(size, size, &faer_triplets)
            .map(|matrix| Self { matrix })
            .map_err(|e| Error::InvalidSparse(format!("{:?}", e)))
    }
}

impl RealOperator for SparseRealOperator {
    fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        let n = self.matrix.nrows();
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), n);

        y.iter_mut().for_each(|yi| *yi = 0.0);

        // CSC: for each column j, y += A[:, j] * x[j]
        let mat_ref = self.matrix.as_ref();
        let col_ptrs = mat_ref.col_ptr();
        let row_indices = mat_ref.row_idx();
        let values = mat_ref.val();

        for j in 0..n {
            let xj = x[j];
            for idx in col_ptrs[j]..col_ptrs[j + 1] {
                y[row_indices[idx]] += values[idx] * xj;
            }
        }
    }
}
