// Result extractor: solver output -> flow assignment

use super::compiler::CompiledModel;
use crate::domain::{
    assignment::{EdgeFlow, FlowAssignment, FlowPlan},
    errors::{FlowError, FlowResult},
    models::Solution,
    network::SupplyChainNetwork,
    solver_service::SolverError,
};
use tracing::debug;

pub struct ResultExtractor {
    tolerance: f64,
    precision: usize,
}

impl ResultExtractor {
    pub fn new(tolerance: f64, precision: usize) -> Self {
        Self {
            tolerance,
            precision,
        }
    }

    /// Keeps edges whose flow exceeds the tolerance; non-optimal solutions
    /// yield no assignment at all
    pub fn extract(
        &self,
        network: &SupplyChainNetwork,
        model: &CompiledModel,
        solution: &Solution,
        solver: &str,
    ) -> FlowResult<FlowPlan> {
        if !solution.is_optimal() {
            return Err(FlowError::Model {
                status: solution.status,
                message: solution.message.clone(),
            });
        }
        if solution.variable_values.len() != model.edges.len() {
            return Err(SolverError::ExecutionFailed(format!(
                "solver returned {} values for {} variables",
                solution.variable_values.len(),
                model.edges.len()
            ))
            .into());
        }

        let mut flows = Vec::new();
        for (i, (&edge, &flow)) in model
            .edges
            .iter()
            .zip(&solution.variable_values)
            .enumerate()
        {
            if flow <= self.tolerance {
                continue;
            }
            let Some((from, to)) = network.endpoints(edge) else {
                continue;
            };
            flows.push(EdgeFlow {
                source: from.id.clone(),
                destination: to.id.clone(),
                route: network.route_kind(edge),
                flow,
                unit_objective: model.program.objective[i],
            });
        }
        debug!(active_edges = flows.len(), "flows extracted");

        let assignment = FlowAssignment::new(flows, self.precision);
        Ok(FlowPlan {
            status: solution.status,
            objective_value: solution
                .objective_value
                .unwrap_or_else(|| assignment.total_cost()),
            assignment,
            statistics: solution.statistics.clone(),
            solver: solver.to_string(),
        })
    }
}
