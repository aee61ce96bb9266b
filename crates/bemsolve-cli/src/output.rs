//! Solve report formatting.

use std::fmt;

use bemsolve_core::FunctionRepresentation;
use bemsolve_solver::{Algorithm, SolveOutcome};

/// Render a solve report: status summary followed by the solution
/// coefficients, one DOF per line.
pub fn format_outcome(algorithm: Algorithm, outcome: &SolveOutcome) -> String {
    Report { algorithm, outcome }.to_string()
}

struct Report<'a> {
    algorithm: Algorithm,
    outcome: &'a SolveOutcome,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} Solve", self.algorithm.name());
        let status = self.outcome.status();
        let solution = self.outcome.solution();

        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Status:     {} (code {})", status, status.code())?;
        writeln!(f, "Iterations: {}", self.outcome.iterations())?;
        writeln!(f, "Time:       {:.2E} s", self.outcome.elapsed().as_secs_f64())?;
        writeln!(f, "Space:      {}", solution.space())?;
        writeln!(f)?;
        writeln!(f, "{:>6}  {:>16}", "DOF", "Coefficient")?;
        for (dof, value) in solution.coefficients().iter().enumerate() {
            writeln!(f, "{:>6}  {:>16.9e}", dof, value)?;
        }
        Ok(())
    }
}
