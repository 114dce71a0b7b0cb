// Routing collaborator interface: travel time between two positions

use super::errors::RoutingError;
use super::network::Position;
use async_trait::async_trait;

/// One travel-time lookup, for the edge `origin_id -> destination_id`
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub origin_id: String,
    pub destination_id: String,
    pub origin: Position,
    pub destination: Position,
}

/// Estimates travel time in minutes
///
/// Lookups for different edges are independent and may run concurrently.
/// A failure is an `Err`; `Ok(0.0)` is a genuine zero-duration route.
#[async_trait]
pub trait TravelTimeEstimator: Send + Sync {
    async fn travel_time(&self, query: &RouteQuery) -> Result<f64, RoutingError>;

    fn name(&self) -> &str;
}
