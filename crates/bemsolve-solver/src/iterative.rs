//! Iterative solves of boundary operator equations.
//!
//! Turns `A u = f`, with `A` a [`BoundaryOperator`] and `f` a grid function,
//! into the numeric system `W x = b` where `W` is the weak form of `A` and
//! `b` holds the projections of `f` onto the dual-to-range space of `A`. The
//! numeric solution is returned as a [`GridFunction`] on the domain of `A`.
//!
//! ```ignore
//! use bemsolve_solver::gmres;
//!
//! let (solution, status) = gmres(&operator, &rhs, 1e-5, None, None)?.into_parts();
//! assert_eq!(status.code(), 0);
//! ```

use std::time::{Duration, Instant};

use bemsolve_core::{BoundaryOperator, FunctionRepresentation, GridFunction};
use nalgebra::DVector;

use crate::cg::{CgConfig, solve_cg};
use crate::error::{Error, Result};
use crate::gmres::{GmresConfig, solve_gmres_real};
use crate::logger::{LogFacade, SolveLogger};
use crate::monitor::IterationCounter;
use crate::status::SolveStatus;

/// Default relative residual tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Krylov method used for a solve, with its method-specific options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Restarted GMRES. `restart: None` uses the solver default.
    Gmres { restart: Option<usize> },
    /// Conjugate Gradient. The weak form must be symmetric positive definite.
    Cg,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Gmres { .. } => "GMRES",
            Algorithm::Cg => "CG",
        }
    }
}

/// Options for [`solve`].
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Krylov method and its options.
    pub algorithm: Algorithm,
    /// Relative residual tolerance.
    pub tolerance: f64,
    /// Iteration cap. `None` leaves the solver default in place.
    pub max_iterations: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::gmres()
    }
}

impl SolveOptions {
    /// GMRES with default restart.
    pub fn gmres() -> Self {
        Self {
            algorithm: Algorithm::Gmres { restart: None },
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
        }
    }

    /// Conjugate Gradient.
    pub fn cg() -> Self {
        Self {
            algorithm: Algorithm::Cg,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the GMRES restart length. Has no effect for CG.
    pub fn with_restart(mut self, restart: usize) -> Self {
        if let Algorithm::Gmres { .. } = self.algorithm {
            self.algorithm = Algorithm::Gmres {
                restart: Some(restart),
            };
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidArgument(
                "max_iterations must be positive".to_string(),
            ));
        }
        if let Algorithm::Gmres { restart: Some(0) } = self.algorithm {
            return Err(Error::InvalidArgument(
                "restart must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Solution of a boundary operator equation.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    solution: GridFunction,
    status: SolveStatus,
    iterations: usize,
    elapsed: Duration,
}

impl SolveOutcome {
    /// Solution on the operator's domain space.
    ///
    /// Only meaningful when [`status`](Self::status) reports convergence.
    pub fn solution(&self) -> &GridFunction {
        &self.solution
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Iterations reported by the solver's per-iteration callback.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Wall-clock time spent inside the Krylov solver.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Split into `(solution, status)`.
    pub fn into_parts(self) -> (GridFunction, SolveStatus) {
        (self.solution, self.status)
    }
}

/// Solve `operator * u = rhs` iteratively.
///
/// All argument checks run before the weak form is requested. The weak form
/// and the right-hand side projections are each obtained exactly once. The
/// solver's status is passed through unchanged: a non-converged or broken
/// down solve still returns `Ok`, with the last iterate as solution.
pub fn solve<A, F>(
    operator: &A,
    rhs: &F,
    options: &SolveOptions,
    logger: &dyn SolveLogger,
) -> Result<SolveOutcome>
where
    A: BoundaryOperator + ?Sized,
    F: FunctionRepresentation + ?Sized,
{
    options.validate()?;
    check_operator(operator)?;
    check_rhs(rhs)?;

    let weak_form = operator.weak_form();
    // The system is tested against the operator's dual space, not the
    // space the right-hand side lives in.
    let b = rhs.projections(operator.dual_to_range())?;

    let n = operator.domain().global_dof_count();
    if weak_form.dim() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: weak_form.dim(),
        });
    }
    if b.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: b.len(),
        });
    }

    let name = options.algorithm.name();
    let mut counter = IterationCounter::new();

    let start = Instant::now();
    logger.info(&format!("Starting {} iteration", name));

    let (x, status) = match options.algorithm {
        Algorithm::Gmres { restart } => {
            let config = GmresConfig {
                max_iter: options.max_iterations,
                tol: options.tolerance,
                restart,
            };
            let result = solve_gmres_real(&*weak_form, b.as_slice(), &config, &mut counter);
            (result.x, result.status)
        }
        Algorithm::Cg => {
            let config = CgConfig {
                max_iter: options.max_iterations,
                tol: options.tolerance,
            };
            let result = solve_cg(&*weak_form, b.as_slice(), &config, &mut counter);
            (result.x, result.status)
        }
    };

    let elapsed = start.elapsed();
    logger.info(&format!(
        "{} finished in {} iterations and took {:.2E} sec.",
        name,
        counter.count(),
        elapsed.as_secs_f64()
    ));

    let solution = GridFunction::new(operator.domain().clone(), DVector::from_vec(x))?;

    Ok(SolveOutcome {
        solution,
        status,
        iterations: counter.count(),
        elapsed,
    })
}

/// Solve with restarted GMRES, logging through the `log` facade.
pub fn gmres<A, F>(
    operator: &A,
    rhs: &F,
    tolerance: f64,
    restart: Option<usize>,
    max_iterations: Option<usize>,
) -> Result<SolveOutcome>
where
    A: BoundaryOperator + ?Sized,
    F: FunctionRepresentation + ?Sized,
{
    let options = SolveOptions {
        algorithm: Algorithm::Gmres { restart },
        tolerance,
        max_iterations,
    };
    solve(operator, rhs, &options, &LogFacade)
}

/// Solve with Conjugate Gradient, logging through the `log` facade.
pub fn cg<A, F>(
    operator: &A,
    rhs: &F,
    tolerance: f64,
    max_iterations: Option<usize>,
) -> Result<SolveOutcome>
where
    A: BoundaryOperator + ?Sized,
    F: FunctionRepresentation + ?Sized,
{
    let options = SolveOptions {
        algorithm: Algorithm::Cg,
        tolerance,
        max_iterations,
    };
    solve(operator, rhs, &options, &LogFacade)
}

fn check_operator<A: BoundaryOperator + ?Sized>(operator: &A) -> Result<()> {
    let domain = operator.domain();
    let dual = operator.dual_to_range();
    if domain.global_dof_count() == 0 {
        return Err(Error::InvalidArgument(format!(
            "operator must be a Boundary Operator: domain {} has no DOFs",
            domain
        )));
    }
    if domain.global_dof_count() != dual.global_dof_count() {
        return Err(Error::InvalidArgument(format!(
            "operator must be a Boundary Operator with a square weak form: \
             domain {} vs dual to range {}",
            domain, dual
        )));
    }
    Ok(())
}

fn check_rhs<F: FunctionRepresentation + ?Sized>(rhs: &F) -> Result<()> {
    let space = rhs.space();
    if rhs.coefficients().len() != space.global_dof_count() {
        return Err(Error::InvalidArgument(format!(
            "right-hand side must be a Function Representation: {} coefficients for space {}",
            rhs.coefficients().len(),
            space
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopLogger;
    use bemsolve_core::{AssembledBoundaryOperator, Space};
    use nalgebra::DMatrix;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLogger(RefCell<Vec<String>>);

    impl SolveLogger for RecordingLogger {
        fn info(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn spd_operator() -> AssembledBoundaryOperator {
        let matrix = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        AssembledBoundaryOperator::from_dense(
            Space::continuous(1, 3),
            Space::continuous(1, 3),
            matrix,
        )
        .unwrap()
    }

    #[test]
    fn solve_options_defaults() {
        let options = SolveOptions::default();
        assert_eq!(options.algorithm, Algorithm::Gmres { restart: None });
        assert!((options.tolerance - 1e-5).abs() < 1e-20);
        assert_eq!(options.max_iterations, None);
    }

    #[test]
    fn with_restart_only_applies_to_gmres() {
        let gmres = SolveOptions::gmres().with_restart(5);
        assert_eq!(gmres.algorithm, Algorithm::Gmres { restart: Some(5) });

        let cg = SolveOptions::cg().with_restart(5);
        assert_eq!(cg.algorithm, Algorithm::Cg);
    }

    #[test]
    fn invalid_options_rejected() {
        for options in [
            SolveOptions::gmres().with_tolerance(0.0),
            SolveOptions::gmres().with_tolerance(-1.0),
            SolveOptions::cg().with_tolerance(f64::NAN),
            SolveOptions::cg().with_max_iterations(0),
            SolveOptions::gmres().with_restart(0),
        ] {
            assert!(matches!(options.validate(), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn logs_start_and_finish() {
        let op = spd_operator();
        let rhs = GridFunction::from_slice(Space::continuous(1, 3), &[1.0, 2.0, 3.0]).unwrap();
        let logger = RecordingLogger::default();

        let outcome = solve(&op, &rhs, &SolveOptions::cg(), &logger).unwrap();

        let messages = logger.0.borrow();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Starting CG iteration");
        assert!(messages[1].starts_with(&format!(
            "CG finished in {} iterations and took ",
            outcome.iterations()
        )));
        assert!(messages[1].ends_with(" sec."));
    }

    #[test]
    fn result_lives_on_domain() {
        let domain = Space::discontinuous(0, 3);
        let dual = Space::continuous(1, 3);
        let op = AssembledBoundaryOperator::from_dense(
            domain.clone(),
            dual.clone(),
            DMatrix::from_diagonal_element(3, 3, 2.0),
        )
        .unwrap();
        let rhs = GridFunction::from_slice(dual, &[2.0, 4.0, 6.0]).unwrap();

        let (solution, status) = solve(&op, &rhs, &SolveOptions::gmres(), &NoopLogger)
            .unwrap()
            .into_parts();

        assert!(status.is_converged());
        assert_eq!(solution.space(), &domain);
        assert!((solution.coefficients()[2] - 3.0).abs() < 1e-4);
    }

    #[test]
    fn operator_without_dofs_rejected() {
        let op = AssembledBoundaryOperator::identity(Space::continuous(1, 0));
        let rhs = GridFunction::zeros(Space::continuous(1, 0));
        let err = solve(&op, &rhs, &SolveOptions::gmres(), &NoopLogger).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.starts_with("operator must be")));
    }

    #[test]
    fn projection_size_mismatch_reported() {
        let op = spd_operator();
        let rhs = GridFunction::from_slice(Space::continuous(1, 2), &[1.0, 2.0]).unwrap();
        let err = solve(&op, &rhs, &SolveOptions::gmres(), &NoopLogger).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(bemsolve_core::Error::DimensionMismatch { .. })
        ));
    }
}
