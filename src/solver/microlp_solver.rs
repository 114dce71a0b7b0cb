// Pure-Rust simplex adapter (microlp through good_lp), available in every build

use super::good_lp_model::{interpret, translate};
use crate::domain::{
    models::{LinearProgram, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use good_lp::{solvers::microlp::microlp, SolverModel};
use std::time::Instant;
use tracing::debug;

pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &LinearProgram) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let model = translate(problem);

        let mut lp_model = model.vars.minimise(model.objective).using(microlp);
        for constraint in model.constraints {
            lp_model = lp_model.with(constraint);
        }

        let solution = interpret(problem, &model.columns, lp_model.solve(), start_time)?;
        debug!(
            solver = self.name(),
            status = %solution.status,
            solve_time_ms = solution.statistics.solve_time_ms,
            "solve finished"
        );
        Ok(solution)
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Variable};
    use crate::domain::value_objects::{ConstraintType, SolutionStatus};

    fn transport(demand: f64) -> LinearProgram {
        // two sources (cap 10 each) feeding one sink, the first one cheaper
        let mut lp = LinearProgram::new("transport");
        let a = lp.add_variable(Variable::continuous("a"), 1.0);
        let b = lp.add_variable(Variable::continuous("b"), 3.0);
        lp.add_constraint(Constraint::new(ConstraintType::LessThanOrEqual, vec![(a, 1.0)], 10.0));
        lp.add_constraint(Constraint::new(ConstraintType::LessThanOrEqual, vec![(b, 1.0)], 10.0));
        lp.add_constraint(Constraint::new(ConstraintType::Equal, vec![(a, 1.0), (b, 1.0)], demand));
        lp
    }

    #[test]
    fn solves_to_optimality() {
        let solution = MicroLpSolver::new().solve(&transport(15.0)).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.variable_values[0] - 10.0).abs() < 1e-6);
        assert!((solution.variable_values[1] - 5.0).abs() < 1e-6);
        assert!((solution.objective_value.unwrap() - 25.0).abs() < 1e-6);
        assert!(solution.quality.max_constraint_violation < 1e-6);
        assert_eq!(solution.statistics.num_constraints, 3);
    }

    #[test]
    fn reports_infeasibility_as_status() {
        let solution = MicroLpSolver::new().solve(&transport(25.0)).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.variable_values.is_empty());
    }

    #[test]
    fn reports_unboundedness_as_status() {
        let mut lp = LinearProgram::new("unbounded");
        let x = lp.add_variable(Variable::continuous("x"), -1.0);
        lp.add_constraint(Constraint::new(ConstraintType::GreaterThanOrEqual, vec![(x, 1.0)], 1.0));
        let solution = MicroLpSolver::new().solve(&lp).unwrap();
        assert_eq!(solution.status, SolutionStatus::Unbounded);
    }

    #[test]
    fn invalid_programs_are_rejected_before_solving() {
        let lp = LinearProgram::new("empty");
        assert!(MicroLpSolver::new().solve(&lp).is_err());
    }
}
