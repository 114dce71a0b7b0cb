// Flow model compiler: supply-chain network -> linear program
//
// One non-negative variable per edge, then rows in a fixed order:
// supply (per factory), balance (per warehouse), demand (per store),
// capacity (per edge).

use crate::domain::{
    config::ObjectiveWeighting,
    errors::{FlowError, FlowResult},
    models::{Constraint, LinearProgram, Variable},
    network::{SupplyChainNetwork, Weight},
    value_objects::{ConstraintType, Tier},
};
use petgraph::graph::EdgeIndex;
use petgraph::Direction;
use tracing::{debug, info};

/// Slack allowed when checking constant rows and the supply/demand totals
const CONSTANT_ROW_TOLERANCE: f64 = 1e-9;

/// Linear program together with the edge behind each variable
#[derive(Debug, Clone)]
pub struct CompiledModel {
    pub program: LinearProgram,
    /// `edges[i]` is the edge of variable `i`
    pub edges: Vec<EdgeIndex>,
}

impl CompiledModel {
    pub fn variable_of(&self, edge: EdgeIndex) -> Option<usize> {
        self.edges.iter().position(|&e| e == edge)
    }
}

pub struct FlowModelCompiler {
    weighting: ObjectiveWeighting,
}

impl FlowModelCompiler {
    pub fn new(weighting: ObjectiveWeighting) -> Self {
        Self { weighting }
    }

    pub fn compile(&self, network: &SupplyChainNetwork) -> FlowResult<CompiledModel> {
        let total_supply = network.total_supply();
        let total_demand = network.total_demand();
        if total_supply + CONSTANT_ROW_TOLERANCE < total_demand {
            return Err(FlowError::infeasible(format!(
                "total supply {} is below total demand {}",
                total_supply, total_demand
            )));
        }

        let mut program = LinearProgram::new("Supply_Chain_Optimization");
        let mut edges = Vec::with_capacity(network.edge_count());

        for edge in network.edges() {
            let Some((from, to)) = network.endpoints(edge) else {
                continue;
            };
            let route = network.route(edge);
            let coefficient = self
                .weighting
                .coefficient(route.cost, route.weight.minutes())
                .ok_or_else(|| FlowError::Weight {
                    origin: from.id.clone(),
                    destination: to.id.clone(),
                    reason: match &route.weight {
                        Weight::Unresolved(reason) => reason.clone(),
                        _ => "travel time missing".to_string(),
                    },
                })?;
            if let Weight::Fallback { minutes, reason } = &route.weight {
                if self.weighting.requires_weight() {
                    debug!(
                        origin = %from.id,
                        destination = %to.id,
                        minutes,
                        %reason,
                        "pricing edge with fallback travel time"
                    );
                }
            }
            program.add_variable(
                Variable::continuous(format!("Flow_{}_{}", from.id, to.id)),
                coefficient,
            );
            edges.push(edge);
        }

        let var = |edge: EdgeIndex| edge.index();

        for factory in network.nodes_of(Tier::Factory) {
            let terms = network
                .incident_edges(factory, Direction::Outgoing)
                .into_iter()
                .map(|e| (var(e), 1.0))
                .collect();
            let supply = network.supply(factory).unwrap_or(0.0);
            push_row(
                &mut program,
                Constraint::new(ConstraintType::LessThanOrEqual, terms, supply)
                    .with_name(format!("Supply_{}", network.node(factory).id)),
            )?;
        }

        for warehouse in network.nodes_of(Tier::Warehouse) {
            let inflow = network
                .incident_edges(warehouse, Direction::Incoming)
                .into_iter()
                .map(|e| (var(e), 1.0));
            let outflow = network
                .incident_edges(warehouse, Direction::Outgoing)
                .into_iter()
                .map(|e| (var(e), -1.0));
            push_row(
                &mut program,
                Constraint::new(ConstraintType::Equal, inflow.chain(outflow).collect(), 0.0)
                    .with_name(format!("Balance_{}", network.node(warehouse).id)),
            )?;
        }

        for store in network.nodes_of(Tier::Store) {
            let terms = network
                .incident_edges(store, Direction::Incoming)
                .into_iter()
                .map(|e| (var(e), 1.0))
                .collect();
            let demand = network.demand(store).unwrap_or(0.0);
            push_row(
                &mut program,
                Constraint::new(ConstraintType::Equal, terms, demand)
                    .with_name(format!("Demand_{}", network.node(store).id)),
            )?;
        }

        for &edge in &edges {
            let name = match network.endpoints(edge) {
                Some((from, to)) => format!("Capacity_{}_{}", from.id, to.id),
                None => format!("Capacity_{}", edge.index()),
            };
            push_row(
                &mut program,
                Constraint::new(
                    ConstraintType::LessThanOrEqual,
                    vec![(var(edge), 1.0)],
                    network.route(edge).capacity,
                )
                .with_name(name),
            )?;
        }

        info!(
            variables = program.num_variables(),
            constraints = program.num_constraints(),
            weighting = ?self.weighting,
            "flow model compiled"
        );
        Ok(CompiledModel { program, edges })
    }
}

/// Adds `row`, or checks it on the spot when no edge contributes to it
fn push_row(program: &mut LinearProgram, row: Constraint) -> FlowResult<()> {
    if !row.is_empty() {
        program.add_constraint(row);
        return Ok(());
    }
    if row.constraint_type.violation(0.0, row.bound) > CONSTANT_ROW_TOLERANCE {
        return Err(FlowError::infeasible(format!(
            "constraint {} requires {} but no edge contributes to it",
            row.name, row.bound
        )));
    }
    debug!(constraint = %row.name, "dropping empty constraint");
    Ok(())
}
