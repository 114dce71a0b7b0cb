// Domain service interface for solving linear programs
// Any simplex or interior-point backend can sit behind it

use super::models::{LinearProgram, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Solver exceeded the time limit of {0:.1}s")]
    Timeout(f64),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for LP solvers
///
/// Infeasible and unbounded programs are not errors: they come back as a
/// [`Solution`] carrying that status. `Err` is reserved for adapter failures.
pub trait SolverService: Send + Sync {
    /// Solve a linear program from scratch
    fn solve(&self, problem: &LinearProgram) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &LinearProgram) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        if num_vars == 0 {
            errors.push("Problem must have at least one variable".to_string());
        }

        if problem.objective.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                num_vars,
                problem.objective.len()
            ));
        }

        for (i, coeff) in problem.objective.iter().enumerate() {
            if !coeff.is_finite() {
                errors.push(format!("Objective coefficient {} is not finite", i));
            }
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if !constraint.bound.is_finite() {
                errors.push(format!(
                    "Constraint {} '{}' has a non-finite bound",
                    i, constraint.name
                ));
            }
            for &(index, coeff) in &constraint.terms {
                if index >= num_vars {
                    errors.push(format!(
                        "Constraint {} '{}' references variable {} but problem has {} variables",
                        i, constraint.name, index, num_vars
                    ));
                } else if !coeff.is_finite() {
                    errors.push(format!(
                        "Constraint {} '{}' has a non-finite coefficient",
                        i, constraint.name
                    ));
                }
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
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
}
