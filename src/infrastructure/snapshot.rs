// JSON snapshot of the four input tables, optionally with run settings.
//
// ```json
// {
//   "nodes": [{"id": "F1", "tier": "Factory"}],
//   "coordinates": [{"id": "F1", "latitude": 38.75, "longitude": -9.15}],
//   "edges": [{"source": "F1", "destination": "W1", "capacity": 40, "cost": 2}],
//   "supply_demand": [{"id": "F1", "type": "Supply", "quantity": 50}],
//   "config": {"backend": "micro_lp"}
// }
// ```

use crate::domain::{
    config::OptimizerConfig,
    errors::InputError,
    records::{CoordinateRecord, EdgeRecord, NetworkSource, NodeRecord, SupplyDemandRecord},
    value_objects::Tier,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub coordinates: Vec<CoordinateRecord>,
    pub edges: Vec<EdgeRecord>,
    pub supply_demand: Vec<SupplyDemandRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<OptimizerConfig>,
}

impl NetworkSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Malformed(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| InputError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Demonstration network: two factories, two warehouses, three stores
    /// around Lisbon, with one direct factory-to-store lane
    pub fn sample() -> Self {
        let nodes = [
            ("F1", Tier::Factory, 38.7600, -9.1500),
            ("F2", Tier::Factory, 38.6900, -9.3200),
            ("W1", Tier::Warehouse, 38.7300, -9.2000),
            ("W2", Tier::Warehouse, 38.7800, -9.1000),
            ("S1", Tier::Store, 38.7100, -9.1400),
            ("S2", Tier::Store, 38.7400, -9.1300),
            ("S3", Tier::Store, 38.7200, -9.2300),
        ];
        let edges = [
            ("F1", "W1", 40.0, 2.0),
            ("F1", "W2", 30.0, 3.0),
            ("F2", "W1", 35.0, 4.0),
            ("F2", "W2", 50.0, 2.0),
            ("W1", "S1", 30.0, 1.0),
            ("W1", "S2", 20.0, 2.0),
            ("W1", "S3", 40.0, 3.0),
            ("W2", "S1", 20.0, 2.0),
            ("W2", "S2", 15.0, 1.0),
            ("W2", "S3", 60.0, 2.0),
            ("F1", "S3", 10.0, 6.0),
        ];

        Self {
            nodes: nodes
                .iter()
                .map(|&(id, tier, _, _)| NodeRecord::new(id, tier))
                .collect(),
            coordinates: nodes
                .iter()
                .map(|&(id, _, lat, lon)| CoordinateRecord::new(id, lat, lon))
                .collect(),
            edges: edges
                .iter()
                .map(|&(from, to, capacity, cost)| EdgeRecord::new(from, to, capacity, cost))
                .collect(),
            supply_demand: vec![
                SupplyDemandRecord::supply("F1", 50.0),
                SupplyDemandRecord::supply("F2", 50.0),
                SupplyDemandRecord::demand("S1", 30.0),
                SupplyDemandRecord::demand("S2", 10.0),
                SupplyDemandRecord::demand("S3", 60.0),
            ],
            config: None,
        }
    }
}

impl NetworkSource for NetworkSnapshot {
    fn edges(&self) -> Result<Vec<EdgeRecord>, InputError> {
        Ok(self.edges.clone())
    }

    fn nodes(&self) -> Result<Vec<NodeRecord>, InputError> {
        Ok(self.nodes.clone())
    }

    fn coordinates(&self) -> Result<Vec<CoordinateRecord>, InputError> {
        Ok(self.coordinates.clone())
    }

    fn supply_demand(&self) -> Result<Vec<SupplyDemandRecord>, InputError> {
        Ok(self.supply_demand.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::QuantityKind;

    #[test]
    fn parses_documented_layout() {
        let snapshot = NetworkSnapshot::from_json_str(
            r#"{
                "nodes": [{"id": "F1", "tier": "Factory"}, {"Node": "S1", "Type": "Store"}],
                "coordinates": [
                    {"id": "F1", "latitude": 38.75, "longitude": -9.15},
                    {"Node": "S1", "Latitude": 38.7, "Longitude": -9.1}
                ],
                "edges": [{"source": "F1", "destination": "S1", "capacity": 40, "cost": 2}],
                "supply_demand": [
                    {"id": "F1", "type": "Supply", "quantity": 50},
                    {"Node": "S1", "Type": "Demand", "Quantity": 20}
                ],
                "config": {"backend": "micro_lp", "display_precision": 3}
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges[0].capacity, 40.0);
        assert_eq!(snapshot.supply_demand[1].kind, QuantityKind::Demand);
        assert_eq!(snapshot.config.unwrap().display_precision, 3);
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let err = NetworkSnapshot::from_json_str(r#"{"nodes": 3}"#).unwrap_err();
        assert!(matches!(err, InputError::Malformed(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = NetworkSnapshot::from_path("/nonexistent/network.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/network.json"));
    }

    #[test]
    fn sample_is_balanced() {
        let sample = NetworkSnapshot::sample();
        let total = |kind| {
            sample
                .supply_demand
                .iter()
                .filter(|r| r.kind == kind)
                .map(|r| r.quantity)
                .sum::<f64>()
        };
        assert_eq!(total(QuantityKind::Supply), 100.0);
        assert_eq!(total(QuantityKind::Demand), 100.0);
    }
}
