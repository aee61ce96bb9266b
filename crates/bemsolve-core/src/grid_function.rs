//! Grid functions: coefficient vectors tied to a discretization space.

use nalgebra::DVector;

use crate::error::{Error, Result};
use crate::space::Space;

/// A discrete function that can be paired against a dual space.
///
/// Solvers never read a right-hand side's coefficients directly. They ask
/// for its projections onto the dual space of the operator being inverted.
pub trait FunctionRepresentation {
    /// Space the coefficients are expressed in.
    fn space(&self) -> &Space;

    /// Expansion coefficients in the basis of [`space`](Self::space).
    fn coefficients(&self) -> &[f64];

    /// Pair this function with every basis function of `dual_space`.
    fn projections(&self, dual_space: &Space) -> Result<DVector<f64>>;
}

/// A function on a boundary grid given by its coefficients in a [`Space`].
///
/// A grid function may also remember the projections it was built from, in
/// which case projecting onto that same dual space returns them unchanged.
#[derive(Debug, Clone)]
pub struct GridFunction {
    space: Space,
    coefficients: DVector<f64>,
    projections: Option<(Space, DVector<f64>)>,
}

impl GridFunction {
    /// Create from coefficients. The length must equal the DOF count.
    pub fn new(space: Space, coefficients: DVector<f64>) -> Result<Self> {
        if coefficients.len() != space.global_dof_count() {
            return Err(Error::DimensionMismatch {
                expected: space.global_dof_count(),
                actual: coefficients.len(),
            });
        }
        Ok(Self {
            space,
            coefficients,
            projections: None,
        })
    }

    /// Create from a coefficient slice.
    pub fn from_slice(space: Space, coefficients: &[f64]) -> Result<Self> {
        Self::new(space, DVector::from_column_slice(coefficients))
    }

    /// The zero function on `space`.
    pub fn zeros(space: Space) -> Self {
        let n = space.global_dof_count();
        Self {
            space,
            coefficients: DVector::zeros(n),
            projections: None,
        }
    }

    /// Create from projections onto `dual_space`.
    ///
    /// Coefficients are recovered through the lumped mass of the dual space,
    /// so `dual_space` must have as many DOFs as `space`.
    pub fn from_projections(
        space: Space,
        dual_space: Space,
        projections: DVector<f64>,
    ) -> Result<Self> {
        let n = space.global_dof_count();
        if dual_space.global_dof_count() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: dual_space.global_dof_count(),
            });
        }
        if projections.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: projections.len(),
            });
        }

        let coefficients = DVector::from_iterator(
            n,
            projections
                .iter()
                .zip(dual_space.mass_weights())
                .map(|(p, w)| p / w),
        );

        Ok(Self {
            space,
            coefficients,
            projections: Some((dual_space, projections)),
        })
    }
}

impl FunctionRepresentation for GridFunction {
    fn space(&self) -> &Space {
        &self.space
    }

    fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }

    /// Pairs DOF `i` of this function with DOF `i` of `dual_space` through
    /// the dual's lumped mass. This is a diagonal pairing, not a general
    /// projection between unrelated spaces, so `dual_space` must have the
    /// same DOF count as [`space`](FunctionRepresentation::space).
    fn projections(&self, dual_space: &Space) -> Result<DVector<f64>> {
        if let Some((stored_dual, stored)) = &self.projections {
            if stored_dual == dual_space {
                return Ok(stored.clone());
            }
        }

        let n = self.space.global_dof_count();
        if dual_space.global_dof_count() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: dual_space.global_dof_count(),
            });
        }

        Ok(DVector::from_iterator(
            n,
            self.coefficients
                .iter()
                .zip(dual_space.mass_weights())
                .map(|(c, w)| c * w),
        ))
    }
}
