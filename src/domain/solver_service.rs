// Domain service interface for the linear/integer programming backend
// The covering solvers depend on this trait only, never on a concrete engine

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization backends
///
/// A backend receives a minimization problem whose variables are tagged either
/// binary or continuous and reports a status together with one value per
/// variable. The exact and the relaxed covering solves go through the same
/// method; only the variable domain differs.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        if problem.variables.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                problem.variables.len(),
                num_vars
            ));
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if let Some(&(index, _)) = constraint.terms.iter().find(|(j, _)| *j >= num_vars) {
                errors.push(format!(
                    "Constraint {} '{}' references variable {} but problem has {} variables",
                    i, constraint.name, index, num_vars
                ));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                    i, var.name, var.lower_bound, var.upper_bound
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports binary/integer variables
    fn supports_mip(&self) -> bool;
}
