// Optimization run: records -> network -> LP -> solve -> flow plan
//
// Each run owns its graph and program; nothing is shared between runs, so a
// failed run can be retried with the same inputs.

use super::builder::NetworkBuilder;
use super::compiler::FlowModelCompiler;
use super::extractor::ResultExtractor;
use super::mappers::{self, NetworkInput};
use crate::domain::{
    assignment::FlowPlan,
    config::OptimizerConfig,
    errors::FlowResult,
    models::{LinearProgram, Solution, SolverStatistics},
    network::SupplyChainNetwork,
    records::NetworkSource,
    routing::TravelTimeEstimator,
    solver_service::{SolverError, SolverService},
};
use crate::solver::SolverFactory;
use std::sync::Arc;
use tracing::{info, warn};

pub struct FlowOptimizer {
    config: OptimizerConfig,
    solver: Arc<dyn SolverService>,
    estimator: Arc<dyn TravelTimeEstimator>,
}

impl FlowOptimizer {
    pub fn new(
        config: OptimizerConfig,
        solver: Arc<dyn SolverService>,
        estimator: Arc<dyn TravelTimeEstimator>,
    ) -> Self {
        Self {
            config,
            solver,
            estimator,
        }
    }

    /// Optimizer using the backend named in `config`
    pub fn from_config(
        config: OptimizerConfig,
        estimator: Arc<dyn TravelTimeEstimator>,
    ) -> FlowResult<Self> {
        config.validate()?;
        let solver = SolverFactory::create_from_backend(config.backend)?;
        Ok(Self::new(config, solver, estimator))
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Full run over the tables of `source`
    pub async fn optimize<S: NetworkSource + ?Sized>(&self, source: &S) -> FlowResult<FlowPlan> {
        self.config.validate()?;
        let input = mappers::network_input(source)?;
        let network = self.build_network(input).await;
        self.optimize_network(&network).await
    }

    pub async fn build_network(&self, input: NetworkInput) -> SupplyChainNetwork {
        NetworkBuilder::new(Arc::clone(&self.estimator))
            .with_max_concurrent(self.config.max_concurrent_lookups)
            .with_weight_policy(self.config.weight_policy)
            .build(input)
            .await
    }

    /// Compile, solve and extract for an already built network
    pub async fn optimize_network(&self, network: &SupplyChainNetwork) -> FlowResult<FlowPlan> {
        let model = FlowModelCompiler::new(self.config.weighting).compile(network)?;
        let solution = self.solve(model.program.clone()).await?;

        match ResultExtractor::new(self.config.tolerance, self.config.display_precision).extract(
            network,
            &model,
            &solution,
            self.solver.name(),
        ) {
            Ok(plan) => {
                info!(
                    status = %plan.status,
                    objective = plan.objective_value,
                    active_edges = plan.assignment.len(),
                    total_flow = plan.assignment.total_flow(),
                    solve_time_ms = plan.statistics.solve_time_ms,
                    "optimization finished"
                );
                Ok(plan)
            }
            Err(err) => {
                warn!(status = ?err.status(), error = %err, "optimization produced no flow");
                Err(err)
            }
        }
    }

    /// Runs the blocking solve off the async workers, bounded by the time limit
    async fn solve(&self, program: LinearProgram) -> FlowResult<Solution> {
        // Every row was constant and already satisfied at compile time
        if program.num_variables() == 0 {
            info!("no edges to route, skipping the solver");
            let statistics = SolverStatistics::for_problem(&program, 0.0);
            return Ok(Solution::optimal(&program, Vec::new()).with_statistics(statistics));
        }

        let solver = Arc::clone(&self.solver);
        info!(solver = solver.name(), variables = program.num_variables(), "solving");
        let task = tokio::task::spawn_blocking(move || solver.solve(&program));

        let joined = match self.config.time_limit() {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| SolverError::Timeout(limit.as_secs_f64()))?,
            None => task.await,
        };

        let solution = joined
            .map_err(|e| SolverError::ExecutionFailed(format!("solver task failed: {}", e)))??;
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FlowError;
    use crate::infrastructure::routing::HaversineEstimator;
    use crate::domain::records::{CoordinateRecord, NodeRecord, SupplyDemandRecord};
    use crate::domain::value_objects::{SolutionStatus, SolverBackend, Tier};
    use crate::infrastructure::snapshot::NetworkSnapshot;
    use std::time::Duration;

    struct SlowSolver;

    impl SolverService for SlowSolver {
        fn solve(&self, _problem: &LinearProgram) -> Result<Solution, SolverError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(Solution::infeasible())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FailingSolver;

    impl SolverService for FailingSolver {
        fn solve(&self, _problem: &LinearProgram) -> Result<Solution, SolverError> {
            Err(SolverError::ExecutionFailed("crashed".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn optimizer(config: OptimizerConfig, solver: Arc<dyn SolverService>) -> FlowOptimizer {
        FlowOptimizer::new(config, solver, Arc::new(HaversineEstimator::default()))
    }

    #[tokio::test]
    async fn time_limit_turns_into_solver_timeout() {
        let config = OptimizerConfig::default().with_time_limit(Duration::from_millis(20));
        let err = optimizer(config, Arc::new(SlowSolver))
            .optimize(&NetworkSnapshot::sample())
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Solver(SolverError::Timeout(_))));
        assert_eq!(err.status(), Some(SolutionStatus::Error));
    }

    #[tokio::test]
    async fn solver_status_reaches_the_caller() {
        let err = optimizer(OptimizerConfig::default(), Arc::new(SlowSolver))
            .optimize(&NetworkSnapshot::sample())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(SolutionStatus::Infeasible));
    }

    #[tokio::test]
    async fn adapter_failure_is_fatal() {
        let err = optimizer(OptimizerConfig::default(), Arc::new(FailingSolver))
            .optimize(&NetworkSnapshot::sample())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("crashed"));
    }

    #[tokio::test]
    async fn invalid_config_stops_before_any_work() {
        let config = OptimizerConfig::default().with_tolerance(-1.0);
        let err = optimizer(config, Arc::new(FailingSolver))
            .optimize(&NetworkSnapshot::sample())
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Config(_)));
    }

    #[tokio::test]
    async fn network_without_edges_needs_no_solver() {
        let snapshot = NetworkSnapshot {
            nodes: vec![
                NodeRecord::new("F", Tier::Factory),
                NodeRecord::new("S", Tier::Store),
            ],
            coordinates: vec![
                CoordinateRecord::new("F", 38.7, -9.1),
                CoordinateRecord::new("S", 38.8, -9.2),
            ],
            edges: Vec::new(),
            supply_demand: vec![
                SupplyDemandRecord::supply("F", 10.0),
                SupplyDemandRecord::demand("S", 0.0),
            ],
            config: None,
        };

        let plan = optimizer(OptimizerConfig::default(), Arc::new(FailingSolver))
            .optimize(&snapshot)
            .await
            .unwrap();
        assert_eq!(plan.status, SolutionStatus::Optimal);
        assert_eq!(plan.objective_value, 0.0);
        assert!(plan.assignment.is_empty());
        assert_eq!(plan.assignment.total_flow(), 0.0);
    }

    #[test]
    fn from_config_keeps_the_settings() {
        let config = OptimizerConfig::default()
            .with_backend(SolverBackend::MicroLp)
            .with_display_precision(3);
        let optimizer =
            FlowOptimizer::from_config(config.clone(), Arc::new(HaversineEstimator::default()))
                .unwrap();
        assert_eq!(optimizer.config(), &config);
    }
}
