// Network builder: validated input + travel-time lookups -> weighted graph

use super::mappers::NetworkInput;
use crate::domain::{
    config::WeightPolicy,
    errors::RoutingError,
    network::{Route, SupplyChainNetwork, Weight},
    routing::{RouteQuery, TravelTimeEstimator},
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Assembles a [`SupplyChainNetwork`], resolving one travel time per edge
///
/// Lookups run with at most `max_concurrent` in flight; results are merged by
/// edge position, so arrival order never affects the graph.
pub struct NetworkBuilder {
    estimator: Arc<dyn TravelTimeEstimator>,
    max_concurrent: usize,
    policy: WeightPolicy,
}

impl NetworkBuilder {
    pub fn new(estimator: Arc<dyn TravelTimeEstimator>) -> Self {
        Self {
            estimator,
            max_concurrent: 8,
            policy: WeightPolicy::Fail,
        }
    }

    pub fn with_max_concurrent(mut self, limit: usize) -> Self {
        self.max_concurrent = limit.max(1);
        self
    }

    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn build(&self, input: NetworkInput) -> SupplyChainNetwork {
        let queries: Vec<RouteQuery> = input
            .edges
            .iter()
            .map(|edge| {
                let (from, to) = (&input.nodes[edge.from], &input.nodes[edge.to]);
                RouteQuery {
                    origin_id: from.id.clone(),
                    destination_id: to.id.clone(),
                    origin: from.position,
                    destination: to.position,
                }
            })
            .collect();
        let weights = self.resolve_weights(&queries).await;

        let mut network = SupplyChainNetwork::new();
        let indices: Vec<_> = input
            .nodes
            .into_iter()
            .map(|node| network.add_node(node))
            .collect();
        for (edge, weight) in input.edges.iter().zip(weights) {
            network.add_route(
                indices[edge.from],
                indices[edge.to],
                Route {
                    capacity: edge.capacity,
                    cost: edge.cost,
                    weight,
                },
            );
        }
        for &(node, quantity) in &input.supply {
            network.set_supply(indices[node], quantity);
        }
        for &(node, quantity) in &input.demand {
            network.set_demand(indices[node], quantity);
        }

        let unresolved = network.unresolved_edges().count();
        info!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            unresolved,
            estimator = self.estimator.name(),
            "network built"
        );
        network
    }

    async fn resolve_weights(&self, queries: &[RouteQuery]) -> Vec<Weight> {
        let estimator = self.estimator.as_ref();
        let mut weights: Vec<Option<Weight>> = vec![None; queries.len()];

        let mut lookups = stream::iter(queries.iter().enumerate())
            .map(|(i, query)| async move { (i, estimator.travel_time(query).await) })
            .buffer_unordered(self.max_concurrent);

        while let Some((i, result)) = lookups.next().await {
            weights[i] = Some(self.weight_from(&queries[i], result));
        }

        weights
            .into_iter()
            .map(|w| w.unwrap_or_else(|| Weight::Unresolved("lookup did not complete".to_string())))
            .collect()
    }

    fn weight_from(&self, query: &RouteQuery, result: Result<f64, RoutingError>) -> Weight {
        let failure = match result {
            Ok(minutes) if minutes.is_finite() && minutes >= 0.0 => {
                debug!(
                    origin = %query.origin_id,
                    destination = %query.destination_id,
                    minutes,
                    "travel time resolved"
                );
                return Weight::Resolved(minutes);
            }
            Ok(minutes) => RoutingError::MalformedResponse(format!("travel time {}", minutes)),
            Err(err) => err,
        };

        match self.policy {
            WeightPolicy::Fail => {
                warn!(
                    origin = %query.origin_id,
                    destination = %query.destination_id,
                    error = %failure,
                    "travel time unresolved"
                );
                Weight::Unresolved(failure.to_string())
            }
            WeightPolicy::Fallback(minutes) => {
                warn!(
                    origin = %query.origin_id,
                    destination = %query.destination_id,
                    error = %failure,
                    fallback_minutes = minutes,
                    "travel time unresolved, using fallback"
                );
                Weight::Fallback {
                    minutes,
                    reason: failure.to_string(),
                }
            }
        }
    }
}
