// HiGHS Solver Adapter (feature `highs`)
// Translates the domain linear program to the HiGHS row-wise API

use crate::domain::{
    models::{LinearProgram, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::ConstraintType,
};
use highs::{HighsModelStatus, RowProblem, Sense};
use std::time::Instant;
use tracing::debug;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &LinearProgram) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();

        // Columns first, then rows
        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(problem.num_variables());

        for (var_def, &obj_coeff) in problem.variables.iter().zip(&problem.objective) {
            let lower = var_def.lower_bound;
            let col = match var_def.upper_bound {
                Some(upper) => pb.add_column(obj_coeff, lower..=upper),
                None => pb.add_column(obj_coeff, lower..),
            };
            cols.push(col);
        }

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .filter(|&&(_, coeff)| coeff != 0.0)
                .map(|&(i, coeff)| (cols[i], coeff))
                .collect();

            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        let mut model = pb.optimise(Sense::Minimise);
        model.make_quiet();
        let solved = model.solve();
        let statistics =
            SolverStatistics::for_problem(problem, start_time.elapsed().as_secs_f64() * 1000.0);

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                DomainSolution::optimal(problem, variable_values).with_statistics(statistics)
            }
            HighsModelStatus::Infeasible => {
                DomainSolution::infeasible().with_statistics(statistics)
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                DomainSolution::unbounded().with_statistics(statistics)
            }
            status => {
                return Err(SolverError::ExecutionFailed(format!(
                    "HiGHS solver returned status: {:?}",
                    status
                )))
            }
        };

        debug!(
            solver = self.name(),
            status = %solution.status,
            solve_time_ms = solution.statistics.solve_time_ms,
            "solve finished"
        );
        Ok(solution)
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
