//! Boundary operators.

use std::sync::Arc;

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::operator::{DenseRealOperator, DiagonalOperator, RealOperator};
use crate::space::Space;
use crate::sparse_operator::SparseRealOperator;

/// A discretized boundary integral operator.
///
/// The weak form maps coefficients in [`domain`](Self::domain) to
/// projections onto [`dual_to_range`](Self::dual_to_range). A linear system
/// `A x = b` is therefore set up by projecting `b` onto the dual-to-range
/// space, and the solution lives in the domain space.
pub trait BoundaryOperator {
    /// Space of the operator's argument.
    fn domain(&self) -> &Space;

    /// Space the weak form is tested against.
    fn dual_to_range(&self) -> &Space;

    /// Numeric weak form of the operator.
    fn weak_form(&self) -> Arc<dyn RealOperator>;
}

/// A boundary operator whose weak form has already been assembled.
pub struct AssembledBoundaryOperator {
    domain: Space,
    dual_to_range: Space,
    weak_form: Arc<dyn RealOperator>,
}

impl AssembledBoundaryOperator {
    /// Wrap an assembled weak form.
    ///
    /// The weak form dimension must equal the DOF count of both spaces.
    pub fn new(
        domain: Space,
        dual_to_range: Space,
        weak_form: Arc<dyn RealOperator>,
    ) -> Result<Self> {
        let n = weak_form.dim();
        for space in [&domain, &dual_to_range] {
            if space.global_dof_count() != n {
                return Err(Error::DimensionMismatch {
                    expected: space.global_dof_count(),
                    actual: n,
                });
            }
        }
        Ok(Self {
            domain,
            dual_to_range,
            weak_form,
        })
    }

    /// Weak form given as a dense matrix.
    pub fn from_dense(domain: Space, dual_to_range: Space, matrix: DMatrix<f64>) -> Result<Self> {
        let op = DenseRealOperator::from_matrix(matrix)?;
        Self::new(domain, dual_to_range, Arc::new(op))
    }

    /// Weak form given as sparse (row, col, value) triplets.
    pub fn from_triplets(
        domain: Space,
        dual_to_range: Space,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let op = SparseRealOperator::from_triplets(domain.global_dof_count(), triplets)?;
        Self::new(domain, dual_to_range, Arc::new(op))
    }

    /// Identity operator on `space`, tested against `space` itself.
    ///
    /// Its weak form is the lumped mass matrix of the space.
    pub fn identity(space: Space) -> Self {
        let weak_form = Arc::new(DiagonalOperator::new(space.mass_weights().to_vec()));
        Self {
            domain: space.clone(),
            dual_to_range: space,
            weak_form,
        }
    }
}

impl BoundaryOperator for AssembledBoundaryOperator {
    fn domain(&self) -> &Space {
        &self.domain
    }

    fn dual_to_range(&self) -> &Space {
        &self.dual_to_range
    }

    fn weak_form(&self) -> Arc<dyn RealOperator> {
        Arc::clone(&self.weak_form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_weak_form_is_mass() {
        let space = Space::continuous(1, 3)
            .with_mass_weights(vec![1.0, 2.0, 3.0])
            .unwrap();
        let op = AssembledBoundaryOperator::identity(space.clone());

        assert_eq!(op.domain(), &space);
        assert_eq!(op.dual_to_range(), &space);

        let weak = op.weak_form();
        let mut y = vec![0.0; 3];
        weak.apply(&[1.0, 1.0, 1.0], &mut y);
        assert_eq!(y, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn dense_weak_form_dimension_checked() {
        let err = AssembledBoundaryOperator::from_dense(
            Space::continuous(1, 3),
            Space::discontinuous(0, 3),
            DMatrix::identity(2, 2),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn dual_space_dimension_checked() {
        let err = AssembledBoundaryOperator::from_dense(
            Space::continuous(1, 2),
            Space::discontinuous(0, 3),
            DMatrix::identity(2, 2),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn triplet_weak_form() {
        let op = AssembledBoundaryOperator::from_triplets(
            Space::continuous(1, 2),
            Space::continuous(1, 2),
            &[(0, 0, 2.0), (0, 1, 1.0), (1, 1, 3.0)],
        )
        .unwrap();

        let mut y = vec![0.0; 2];
        op.weak_form().apply(&[1.0, 1.0], &mut y);
        assert_eq!(y, vec![3.0, 3.0]);
    }

    #[test]
    fn weak_form_is_shared() {
        let op = AssembledBoundaryOperator::identity(Space::continuous(1, 2));
        let a = op.weak_form();
        let b = op.weak_form();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
