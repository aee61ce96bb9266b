//! bemsolve - iterative solves of boundary-element linear systems.

mod output;
mod problem;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bemsolve_core::{BoundaryOperator, FunctionRepresentation};
use bemsolve_solver::{Algorithm, DEFAULT_TOLERANCE, LogFacade, SolveOptions, solve};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::output::format_outcome;
use crate::problem::Problem;

/// Krylov method selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Restarted GMRES (general operators)
    Gmres,
    /// Conjugate Gradient (symmetric positive-definite operators)
    Cg,
}

#[derive(Debug, Parser)]
#[command(
    name = "bemsolve",
    version,
    about = "Solve boundary operator equations with GMRES or CG"
)]
struct Cli {
    /// Problem description file (JSON)
    problem: PathBuf,

    /// Krylov method
    #[arg(short, long, value_enum, default_value_t = Method::Gmres)]
    method: Method,

    /// Relative residual tolerance
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tol: f64,

    /// GMRES restart length
    #[arg(long)]
    restart: Option<usize>,

    /// Maximum number of iterations
    #[arg(long)]
    max_iter: Option<usize>,

    /// Print solver progress messages
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn solve_options(&self) -> SolveOptions {
        let algorithm = match self.method {
            Method::Gmres => Algorithm::Gmres {
                restart: self.restart,
            },
            Method::Cg => {
                if self.restart.is_some() {
                    log::warn!("--restart has no effect with CG");
                }
                Algorithm::Cg
            }
        };
        SolveOptions {
            algorithm,
            tolerance: self.tol,
            max_iterations: self.max_iter,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let problem = Problem::load(&cli.problem)?;
    log::debug!(
        "Loaded problem: domain {}, dual to range {}, rhs in {}",
        problem.operator.domain(),
        problem.operator.dual_to_range(),
        problem.rhs.space()
    );

    let options = cli.solve_options();
    let outcome = solve(&problem.operator, &problem.rhs, &options, &LogFacade)
        .context("solve failed")?;

    print!("{}", format_outcome(options.algorithm, &outcome));

    if !outcome.status().is_converged() {
        eprintln!("Warning: {}", outcome.status());
    }
    Ok(())
}
