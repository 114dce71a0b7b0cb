// Input tables and the provider interface feeding the network builder
//
// Field aliases accept the column headers of spreadsheet exports
// (`Node`, `Type`, `Latitude`, `Longitude`, `Quantity`).

use super::errors::InputError;
use super::value_objects::{QuantityKind, Tier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub destination: String,
    pub capacity: f64,
    pub cost: f64,
}

impl EdgeRecord {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        capacity: f64,
        cost: f64,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            capacity,
            cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(alias = "Node")]
    pub id: String,
    #[serde(alias = "Type")]
    pub tier: Tier,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, tier: Tier) -> Self {
        Self { id: id.into(), tier }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    #[serde(alias = "Node")]
    pub id: String,
    #[serde(alias = "Latitude")]
    pub latitude: f64,
    #[serde(alias = "Longitude")]
    pub longitude: f64,
}

impl CoordinateRecord {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyDemandRecord {
    #[serde(alias = "Node")]
    pub id: String,
    #[serde(rename = "type", alias = "Type")]
    pub kind: QuantityKind,
    #[serde(alias = "Quantity")]
    pub quantity: f64,
}

impl SupplyDemandRecord {
    pub fn supply(id: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            kind: QuantityKind::Supply,
            quantity,
        }
    }

    pub fn demand(id: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            kind: QuantityKind::Demand,
            quantity,
        }
    }
}

/// Provider of the four input tables
///
/// Files, fixtures and anything else conforming to the record schemas plug
/// in here.
pub trait NetworkSource {
    fn edges(&self) -> Result<Vec<EdgeRecord>, InputError>;
    fn nodes(&self) -> Result<Vec<NodeRecord>, InputError>;
    fn coordinates(&self) -> Result<Vec<CoordinateRecord>, InputError>;
    fn supply_demand(&self) -> Result<Vec<SupplyDemandRecord>, InputError>;
}
