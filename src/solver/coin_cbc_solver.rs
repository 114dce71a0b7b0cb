// COIN-OR CBC adapter through good_lp (feature `coin_cbc`)

use super::good_lp_model::{interpret, translate};
use crate::domain::{
    models::{LinearProgram, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use good_lp::{solvers::coin_cbc::coin_cbc, SolverModel};
use std::time::Instant;
use tracing::debug;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &LinearProgram) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let model = translate(problem);

        let mut lp_model = model.vars.minimise(model.objective).using(coin_cbc);
        lp_model.set_parameter("log", "0");
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
        "COIN-OR CBC"
    }
}
