// Translation shared by the good_lp based adapters

use crate::domain::{
    models::{LinearProgram, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::ConstraintType,
};
use good_lp::{
    variable, Constraint as GoodLpConstraint, Expression, ProblemVariables, ResolutionError,
    Solution as GoodLpSolutionTrait, Variable as GoodLpVariable,
};
use std::time::Instant;

pub(crate) struct GoodLpModel {
    pub vars: ProblemVariables,
    pub columns: Vec<GoodLpVariable>,
    pub objective: Expression,
    pub constraints: Vec<GoodLpConstraint>,
}

pub(crate) fn translate(problem: &LinearProgram) -> GoodLpModel {
    let mut vars = ProblemVariables::new();
    let mut columns = Vec::with_capacity(problem.num_variables());

    for var_def in &problem.variables {
        let definition = variable().min(var_def.lower_bound);
        let definition = match var_def.upper_bound {
            Some(upper) => definition.max(upper),
            None => definition,
        };
        columns.push(vars.add(definition));
    }

    let mut objective = Expression::with_capacity(columns.len());
    for (&coeff, &column) in problem.objective.iter().zip(&columns) {
        if coeff != 0.0 {
            objective.add_mul(coeff, column);
        }
    }

    let constraints = problem
        .constraints
        .iter()
        .map(|constraint| {
            let mut lhs = Expression::with_capacity(constraint.terms.len());
            for &(i, coeff) in &constraint.terms {
                lhs.add_mul(coeff, columns[i]);
            }
            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => lhs.leq(constraint.bound),
                ConstraintType::Equal => lhs.eq(constraint.bound),
                ConstraintType::GreaterThanOrEqual => lhs.geq(constraint.bound),
            }
        })
        .collect();

    GoodLpModel {
        vars,
        columns,
        objective,
        constraints,
    }
}

/// Maps a good_lp outcome onto the domain solution
pub(crate) fn interpret<S: GoodLpSolutionTrait>(
    problem: &LinearProgram,
    columns: &[GoodLpVariable],
    outcome: std::result::Result<S, ResolutionError>,
    start_time: Instant,
) -> Result<DomainSolution> {
    let statistics =
        SolverStatistics::for_problem(problem, start_time.elapsed().as_secs_f64() * 1000.0);

    match outcome {
        Ok(sol) => {
            let variable_values = columns.iter().map(|&var| sol.value(var)).collect();
            Ok(DomainSolution::optimal(problem, variable_values).with_statistics(statistics))
        }
        Err(ResolutionError::Infeasible) => {
            Ok(DomainSolution::infeasible().with_statistics(statistics))
        }
        Err(ResolutionError::Unbounded) => {
            Ok(DomainSolution::unbounded().with_statistics(statistics))
        }
        Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
    }
}
