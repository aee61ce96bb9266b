//! Iterative solvers for boundary operator equations.
//!
//! The entry points [`gmres()`] and [`cg()`] (or the general [`solve`]) take a
//! [`BoundaryOperator`](bemsolve_core::BoundaryOperator) and a right-hand side
//! grid function, run the Krylov method on the operator's weak form, and
//! return the solution as a grid function on the operator's domain together
//! with a [`SolveStatus`].
//!
//! The Krylov kernels are also usable directly on any
//! [`RealOperator`](bemsolve_core::RealOperator):
//!
//! - [`gmres::solve_gmres_real`] - restarted GMRES
//! - [`cg::solve_cg`] - Conjugate Gradient

pub mod cg;
pub mod error;
pub mod gmres;
pub mod iterative;
pub mod logger;
pub mod monitor;
pub mod status;

pub use cg::{CgConfig, CgResult, solve_cg};
pub use error::{Error, Result};
pub use gmres::{GmresConfig, RealGmresResult, solve_gmres_real};
pub use iterative::{
    Algorithm, DEFAULT_TOLERANCE, SolveOptions, SolveOutcome, cg, gmres, solve,
};
pub use logger::{LogFacade, NoopLogger, SolveLogger};
pub use monitor::{IterationCounter, IterationMonitor};
pub use status::SolveStatus;
