//! Core types for bemsolve.
//!
//! Provides the pieces an iterative boundary-element solve is built from:
//!
//! - [`Space`] - a discretization space with a DOF count and lumped mass weights
//! - [`GridFunction`] - a coefficient vector tied to a [`Space`]
//! - [`BoundaryOperator`] - an operator exposing its weak form and its spaces
//! - [`RealOperator`] - the numeric matrix-free operator consumed by the solvers

pub mod boundary_operator;
pub mod error;
pub mod grid_function;
pub mod operator;
pub mod space;
pub mod sparse_operator;

pub use boundary_operator::{AssembledBoundaryOperator, BoundaryOperator};
pub use error::{Error, Result};
pub use grid_function::{FunctionRepresentation, GridFunction};
pub use operator::{DenseRealOperator, DiagonalOperator, RealOperator};
pub use space::{Space, SpaceKind};
pub use sparse_operator::SparseRealOperator;
