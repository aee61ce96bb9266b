//! Problem description files.
//!
//! A problem is a JSON document describing the operator's spaces, its
//! assembled weak form, and the right-hand side coefficients:
//!
//! ```json
//! {
//!   "domain": { "kind": "continuous", "order": 1, "dofs": 3 },
//!   "weak_form": { "dense": [[2, -1, 0], [-1, 2, -1], [0, -1, 2]] },
//!   "rhs": { "coefficients": [1, 0, 1] }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bemsolve_core::{
    AssembledBoundaryOperator, DenseRealOperator, DiagonalOperator, GridFunction, Space,
    SpaceKind,
};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKindSpec {
    Continuous,
    Discontinuous,
}

impl From<SpaceKindSpec> for SpaceKind {
    fn from(kind: SpaceKindSpec) -> Self {
        match kind {
            SpaceKindSpec::Continuous => SpaceKind::Continuous,
            SpaceKindSpec::Discontinuous => SpaceKind::Discontinuous,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaceSpec {
    pub kind: SpaceKindSpec,
    pub order: u32,
    pub dofs: usize,
    /// Lumped mass weights; unit weights when omitted.
    #[serde(default)]
    pub mass_weights: Option<Vec<f64>>,
}

impl SpaceSpec {
    fn build(&self) -> bemsolve_core::Result<Space> {
        let space = Space::new(self.kind.into(), self.order, self.dofs);
        match &self.mass_weights {
            Some(weights) => space.with_mass_weights(weights.clone()),
            None => Ok(space),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeakFormSpec {
    /// Row-major dense matrix.
    Dense(Vec<Vec<f64>>),
    /// Sparse `[row, col, value]` entries; duplicates are summed.
    Triplets(Vec<(usize, usize, f64)>),
    /// Mass matrix of the dual-to-range space.
    Identity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RhsSpec {
    /// Space of the coefficients; the operator's domain when omitted.
    #[serde(default)]
    pub space: Option<SpaceSpec>,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemSpec {
    pub domain: SpaceSpec,
    /// The domain space when omitted.
    #[serde(default)]
    pub dual_to_range: Option<SpaceSpec>,
    pub weak_form: WeakFormSpec,
    pub rhs: RhsSpec,
}

/// A boundary operator equation ready to be solved.
pub struct Problem {
    pub operator: AssembledBoundaryOperator,
    pub rhs: GridFunction,
}

impl Problem {
    /// Read and build a problem from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid problem file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let spec: ProblemSpec = serde_json::from_str(text).context("malformed problem JSON")?;
        Self::from_spec(&spec)
    }

    pub fn from_spec(spec: &ProblemSpec) -> Result<Self> {
        let domain = spec.domain.build().context("invalid domain space")?;
        let dual = match &spec.dual_to_range {
            Some(dual) => Some(dual.build().context("invalid dual_to_range space")?),
            None => None,
        };

        let operator = match (&spec.weak_form, dual) {
            (WeakFormSpec::Identity, None) => AssembledBoundaryOperator::identity(domain.clone()),
            (WeakFormSpec::Identity, Some(dual)) => {
                let mass = Arc::new(DiagonalOperator::new(dual.mass_weights().to_vec()));
                AssembledBoundaryOperator::new(domain.clone(), dual, mass)?
            }
            (WeakFormSpec::Dense(rows), dual) => {
                let dense = DenseRealOperator::from_rows(rows).context("invalid dense weak form")?;
                let dual = dual.unwrap_or_else(|| domain.clone());
                AssembledBoundaryOperator::new(domain.clone(), dual, Arc::new(dense))?
            }
            (WeakFormSpec::Triplets(triplets), dual) => {
                let dual = dual.unwrap_or_else(|| domain.clone());
                AssembledBoundaryOperator::from_triplets(domain.clone(), dual, triplets)
                    .context("invalid sparse weak form")?
            }
        };

        let rhs_space = match &spec.rhs.space {
            Some(space) => space.build().context("invalid rhs space")?,
            None => domain,
        };
        let rhs = GridFunction::from_slice(rhs_space, &spec.rhs.coefficients)
            .context("invalid rhs coefficients")?;

        Ok(Self { operator, rhs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bemsolve_core::{BoundaryOperator, FunctionRepresentation, RealOperator};

    #[test]
    fn parse_dense_problem() {
        let problem = Problem::from_json(
            r#"{
                "domain": { "kind": "continuous", "order": 1, "dofs": 2 },
                "weak_form": { "dense": [[4.0, 1.0], [1.0, 3.0]] },
                "rhs": { "coefficients": [5.0, 4.0] }
            }"#,
        )
        .unwrap();

        assert_eq!(problem.operator.domain().identifier(), "P1");
        assert_eq!(problem.operator.dual_to_range(), problem.operator.domain());
        assert_eq!(problem.rhs.coefficients(), &[5.0, 4.0]);
    }

    #[test]
    fn parse_triplets_with_dual_space() {
        let problem = Problem::from_json(
            r#"{
                "domain": { "kind": "discontinuous", "order": 0, "dofs": 2 },
                "dual_to_range": { "kind": "continuous", "order": 1, "dofs": 2, "mass_weights": [0.5, 0.5] },
                "weak_form": { "triplets": [[0, 0, 2.0], [1, 1, 2.0]] },
                "rhs": {
                    "space": { "kind": "continuous", "order": 1, "dofs": 2 },
                    "coefficients": [1.0, 1.0]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(problem.operator.domain().identifier(), "DP0");
        assert_eq!(problem.operator.dual_to_range().mass_weights(), &[0.5, 0.5]);
        assert_eq!(problem.rhs.space().identifier(), "P1");
    }

    #[test]
    fn identity_weak_form() {
        let problem = Problem::from_json(
            r#"{
                "domain": { "kind": "continuous", "order": 1, "dofs": 3, "mass_weights": [1.0, 2.0, 1.0] },
                "weak_form": "identity",
                "rhs": { "coefficients": [1.0, 1.0, 1.0] }
            }"#,
        )
        .unwrap();

        let mut y = vec![0.0; 3];
        problem.operator.weak_form().apply(&[1.0, 1.0, 1.0], &mut y);
        assert_eq!(y, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn rhs_length_mismatch_rejected() {
        let result = Problem::from_json(
            r#"{
                "domain": { "kind": "continuous", "order": 1, "dofs": 3 },
                "weak_form": "identity",
                "rhs": { "coefficients": [1.0, 1.0] }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = Problem::from_json(
            r#"{
                "domain": { "kind": "continuous", "order": 1, "dofs": 1, "colour": "red" },
                "weak_form": "identity",
                "rhs": { "coefficients": [1.0] }
            }"#,
        );
        assert!(result.is_err());
    }

    fn shipped(name: &str) -> Problem {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("problems").join(name);
        Problem::load(&path).unwrap()
    }

    #[test]
    fn shipped_laplace_problem_solves() {
        let problem = shipped("laplace_1d.json");
        let outcome = bemsolve_solver::cg(&problem.operator, &problem.rhs, 1e-10, None).unwrap();

        assert!(outcome.status().is_converged());
        let expected = [2.5, 4.0, 4.5, 4.0, 2.5];
        for (x, e) in outcome.solution().coefficients().iter().zip(expected) {
            assert!((x - e).abs() < 1e-8);
        }
    }

    #[test]
    fn shipped_mixed_space_problem_solves() {
        let problem = shipped("mixed_spaces.json");
        let outcome =
            bemsolve_solver::gmres(&problem.operator, &problem.rhs, 1e-10, None, None).unwrap();

        assert!(outcome.status().is_converged());
        assert_eq!(outcome.solution().space().identifier(), "DP0");

        // Residual against the projections onto the dual space, [1, 1, 1].
        let mut ax = vec![0.0; 3];
        problem
            .operator
            .weak_form()
            .apply(outcome.solution().coefficients(), &mut ax);
        for value in ax {
            assert!((value - 1.0).abs() < 1e-8);
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Problem::load(Path::new("does/not/exist.json")).err().unwrap();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
