// Routing collaborators that need no network access

use crate::domain::{
    errors::RoutingError,
    routing::{RouteQuery, TravelTimeEstimator},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Travel time from great-circle distance
///
/// `detour_factor` stretches the straight line towards road distance.
#[derive(Debug, Clone, Copy)]
pub struct HaversineEstimator {
    speed_kmh: f64,
    detour_factor: f64,
}

impl HaversineEstimator {
    pub fn new(speed_kmh: f64, detour_factor: f64) -> Self {
        Self {
            speed_kmh,
            detour_factor,
        }
    }
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self::new(60.0, 1.3)
    }
}

#[async_trait]
impl TravelTimeEstimator for HaversineEstimator {
    async fn travel_time(&self, query: &RouteQuery) -> Result<f64, RoutingError> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(RoutingError::MalformedResponse(format!(
                "speed {} km/h",
                self.speed_kmh
            )));
        }
        let km = query.origin.haversine_km(&query.destination) * self.detour_factor;
        Ok(km / self.speed_kmh * 60.0)
    }

    fn name(&self) -> &str {
        "haversine"
    }
}

/// Fixed travel times keyed by (origin id, destination id)
#[derive(Debug, Clone, Default)]
pub struct FixedTravelTimes {
    minutes: HashMap<(String, String), f64>,
}

impl FixedTravelTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        minutes: f64,
    ) -> Self {
        self.minutes.insert((origin.into(), destination.into()), minutes);
        self
    }
}

#[async_trait]
impl TravelTimeEstimator for FixedTravelTimes {
    async fn travel_time(&self, query: &RouteQuery) -> Result<f64, RoutingError> {
        self.minutes
            .get(&(query.origin_id.clone(), query.destination_id.clone()))
            .copied()
            .ok_or(RoutingError::NotFound)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::Position;

    fn query(origin: Position, destination: Position) -> RouteQuery {
        RouteQuery {
            origin_id: "A".into(),
            destination_id: "B".into(),
            origin,
            destination,
        }
    }

    #[tokio::test]
    async fn haversine_converts_distance_to_minutes() {
        // one degree of longitude on the equator is about 111.2 km
        let estimator = HaversineEstimator::new(60.0, 1.0);
        let minutes = estimator
            .travel_time(&query(Position::new(0.0, 0.0), Position::new(0.0, 1.0)))
            .await
            .unwrap();
        assert!((minutes - 111.2).abs() < 0.5, "got {minutes}");

        let same = estimator
            .travel_time(&query(Position::new(5.0, 5.0), Position::new(5.0, 5.0)))
            .await
            .unwrap();
        assert_eq!(same, 0.0);
    }

    #[tokio::test]
    async fn fixed_times_fail_for_unknown_pairs() {
        let estimator = FixedTravelTimes::new().with("A", "B", 0.0);
        let origin = Position::new(0.0, 0.0);
        assert_eq!(estimator.travel_time(&query(origin, origin)).await, Ok(0.0));

        let mut reversed = query(origin, origin);
        std::mem::swap(&mut reversed.origin_id, &mut reversed.destination_id);
        assert_eq!(
            estimator.travel_time(&reversed).await,
            Err(RoutingError::NotFound)
        );
    }
}
