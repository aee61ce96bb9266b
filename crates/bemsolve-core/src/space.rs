//! Discretization spaces.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Continuity of the basis functions spanning a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Globally continuous piecewise polynomials (`P`).
    Continuous,
    /// Discontinuous piecewise polynomials (`DP`).
    Discontinuous,
}

impl SpaceKind {
    /// Short family prefix used in space identifiers.
    pub fn prefix(&self) -> &'static str {
        match self {
            SpaceKind::Continuous => "P",
            SpaceKind::Discontinuous => "DP",
        }
    }
}

/// A finite-dimensional function space on a boundary grid.
///
/// The space only carries what the solvers need: its family, polynomial
/// order, and one lumped mass weight per degree of freedom. The mass
/// weights define the discrete L2 pairing used when a grid function is
/// projected onto this space as a dual space.
///
/// Spaces compare equal when family, order and mass weights all match.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    kind: SpaceKind,
    order: u32,
    mass_weights: Arc<[f64]>,
}

impl Space {
    /// Create a space with `global_dof_count` DOFs and unit mass weights.
    pub fn new(kind: SpaceKind, order: u32, global_dof_count: usize) -> Self {
        Self {
            kind,
            order,
            mass_weights: vec![1.0; global_dof_count].into(),
        }
    }

    /// Continuous piecewise polynomial space of the given order.
    pub fn continuous(order: u32, global_dof_count: usize) -> Self {
        Self::new(SpaceKind::Continuous, order, global_dof_count)
    }

    /// Discontinuous piecewise polynomial space of the given order.
    pub fn discontinuous(order: u32, global_dof_count: usize) -> Self {
        Self::new(SpaceKind::Discontinuous, order, global_dof_count)
    }

    /// Replace the lumped mass weights.
    ///
    /// The weight count must equal the DOF count and every weight must be
    /// positive and finite.
    pub fn with_mass_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.global_dof_count() {
            return Err(Error::DimensionMismatch {
                expected: self.global_dof_count(),
                actual: weights.len(),
            });
        }
        if let Some((dof, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(Error::InvalidMassWeight { dof, weight });
        }
        self.mass_weights = weights.into();
        Ok(self)
    }

    /// Number of global degrees of freedom.
    pub fn global_dof_count(&self) -> usize {
        self.mass_weights.len()
    }

    /// Lumped mass weight of each DOF.
    pub fn mass_weights(&self) -> &[f64] {
        &self.mass_weights
    }

    /// Family and order, e.g. `P1` or `DP0`.
    pub fn identifier(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.order)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} DOFs)",
            self.identifier(),
            self.global_dof_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_identifier_and_display() {
        let p1 = Space::continuous(1, 12);
        assert_eq!(p1.identifier(), "P1");
        assert_eq!(p1.to_string(), "P1 (12 DOFs)");

        let dp0 = Space::discontinuous(0, 20);
        assert_eq!(dp0.identifier(), "DP0");
        assert_eq!(dp0.global_dof_count(), 20);
    }

    #[test]
    fn default_mass_weights_are_unit() {
        let space = Space::continuous(1, 4);
        assert_eq!(space.mass_weights(), &[1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn mass_weights_must_match_dof_count() {
        let err = Space::continuous(1, 3)
            .with_mass_weights(vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn mass_weights_must_be_positive() {
        let err = Space::discontinuous(0, 3)
            .with_mass_weights(vec![1.0, 0.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMassWeight { dof: 1, .. }));

        let err = Space::discontinuous(0, 2)
            .with_mass_weights(vec![f64::NAN, 1.0])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMassWeight { dof: 0, .. }));
    }

    #[test]
    fn spaces_compare_by_weights() {
        let a = Space::continuous(1, 2);
        let b = Space::continuous(1, 2).with_mass_weights(vec![0.5, 0.5]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Space::continuous(1, 2));
        assert_ne!(a, Space::discontinuous(1, 2));
    }
}
