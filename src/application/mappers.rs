// Mappers: turn raw input records into a validated network description
// Every input error is raised here, before any routing call or LP work

use crate::domain::{
    errors::InputError,
    network::{Node, Position},
    records::{EdgeRecord, NetworkSource, SupplyDemandRecord},
    value_objects::{QuantityKind, Tier},
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Edge between two entries of [`NetworkInput::nodes`]
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub capacity: f64,
    pub cost: f64,
}

/// Validated input snapshot, in input order
#[derive(Debug, Clone, Default)]
pub struct NetworkInput {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeSpec>,
    /// (node position, quantity) for every factory
    pub supply: Vec<(usize, f64)>,
    /// (node position, quantity) for every store
    pub demand: Vec<(usize, f64)>,
}

fn non_negative(
    subject: impl Into<String>,
    field: &'static str,
    value: f64,
) -> Result<f64, InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::InvalidNumber {
            subject: subject.into(),
            field,
            value,
        })
    }
}

fn coordinate(id: &str, field: &'static str, value: f64, limit: f64) -> Result<f64, InputError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(InputError::InvalidNumber {
            subject: format!("node '{}'", id),
            field,
            value,
        })
    }
}

/// Read all four tables from `source` and validate them against each other
pub fn network_input<S: NetworkSource + ?Sized>(source: &S) -> Result<NetworkInput, InputError> {
    let node_records = source.nodes()?;
    let coordinate_records = source.coordinates()?;
    let edge_records = source.edges()?;
    let quantity_records = source.supply_demand()?;

    let mut positions: HashMap<String, Position> = HashMap::with_capacity(coordinate_records.len());
    for record in coordinate_records {
        let latitude = coordinate(&record.id, "latitude", record.latitude, 90.0)?;
        let longitude = coordinate(&record.id, "longitude", record.longitude, 180.0)?;
        if positions
            .insert(record.id.clone(), Position::new(latitude, longitude))
            .is_some()
        {
            return Err(InputError::DuplicateCoordinates(record.id));
        }
    }

    let mut index: HashMap<String, usize> = HashMap::with_capacity(node_records.len());
    let mut nodes = Vec::with_capacity(node_records.len());
    for record in node_records {
        if record.id.trim().is_empty() {
            return Err(InputError::Malformed("node with an empty id".to_string()));
        }
        if index.contains_key(&record.id) {
            return Err(InputError::DuplicateNode(record.id));
        }
        let position = positions
            .get(&record.id)
            .copied()
            .ok_or_else(|| InputError::MissingCoordinates(record.id.clone()))?;
        index.insert(record.id.clone(), nodes.len());
        nodes.push(Node {
            id: record.id,
            tier: record.tier,
            position,
        });
    }

    for id in positions.keys().filter(|id| !index.contains_key(*id)) {
        debug!(node = %id, "ignoring coordinates of a node that is not in the node table");
    }

    let edges = edge_specs(&nodes, &index, edge_records)?;
    let (supply, demand) = quantities(&nodes, &index, quantity_records)?;

    let input = NetworkInput {
        nodes,
        edges,
        supply,
        demand,
    };
    warn_unconnected(&input);
    Ok(input)
}

fn edge_specs(
    nodes: &[Node],
    index: &HashMap<String, usize>,
    records: Vec<EdgeRecord>,
) -> Result<Vec<EdgeSpec>, InputError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut edges = Vec::with_capacity(records.len());

    for record in records {
        let lookup = |node: &str| {
            index.get(node).copied().ok_or_else(|| InputError::DanglingEdge {
                origin: record.source.clone(),
                destination: record.destination.clone(),
                node: node.to_string(),
            })
        };
        let from = lookup(&record.source)?;
        let to = lookup(&record.destination)?;

        if from == to {
            return Err(InputError::SelfLoop {
                origin: record.source,
                destination: record.destination,
            });
        }
        if !nodes[from].tier.can_ship_to(nodes[to].tier) {
            return Err(InputError::TierOrder {
                origin: record.source,
                destination: record.destination,
                from: nodes[from].tier,
                to: nodes[to].tier,
            });
        }
        if !seen.insert((from, to)) {
            return Err(InputError::DuplicateEdge {
                origin: record.source,
                destination: record.destination,
            });
        }

        let subject = format!("edge {} -> {}", record.source, record.destination);
        let capacity = non_negative(subject.clone(), "capacity", record.capacity)?;
        let cost = non_negative(subject, "cost", record.cost)?;
        edges.push(EdgeSpec {
            from,
            to,
            capacity,
            cost,
        });
    }

    Ok(edges)
}

type Quantities = (Vec<(usize, f64)>, Vec<(usize, f64)>);

fn quantities(
    nodes: &[Node],
    index: &HashMap<String, usize>,
    records: Vec<SupplyDemandRecord>,
) -> Result<Quantities, InputError> {
    let mut supply: HashMap<usize, f64> = HashMap::new();
    let mut demand: HashMap<usize, f64> = HashMap::new();

    for record in records {
        let node = index
            .get(&record.id)
            .copied()
            .ok_or_else(|| InputError::UnknownQuantityNode {
                node: record.id.clone(),
                kind: record.kind,
            })?;
        let (expected, table) = match record.kind {
            QuantityKind::Supply => (Tier::Factory, &mut supply),
            QuantityKind::Demand => (Tier::Store, &mut demand),
        };
        if nodes[node].tier != expected {
            return Err(InputError::WrongTier {
                node: record.id,
                kind: record.kind,
                tier: nodes[node].tier,
            });
        }
        let quantity = non_negative(format!("node '{}'", record.id), "quantity", record.quantity)?;
        if table.insert(node, quantity).is_some() {
            return Err(InputError::DuplicateQuantity {
                node: record.id,
                kind: record.kind,
            });
        }
    }

    let mut supply_rows = Vec::with_capacity(supply.len());
    let mut demand_rows = Vec::with_capacity(demand.len());
    for (i, node) in nodes.iter().enumerate() {
        match node.tier {
            Tier::Factory => {
                let quantity = supply
                    .get(&i)
                    .copied()
                    .ok_or_else(|| InputError::MissingSupply(node.id.clone()))?;
                supply_rows.push((i, quantity));
            }
            Tier::Store => {
                let quantity = demand
                    .get(&i)
                    .copied()
                    .ok_or_else(|| InputError::MissingDemand(node.id.clone()))?;
                demand_rows.push((i, quantity));
            }
            Tier::Warehouse => {}
        }
    }

    Ok((supply_rows, demand_rows))
}

fn warn_unconnected(input: &NetworkInput) {
    for &(node, quantity) in &input.supply {
        if !input.edges.iter().any(|e| e.from == node) {
            warn!(
                factory = %input.nodes[node].id,
                supply = quantity,
                "factory has no outgoing edges"
            );
        }
    }
    for &(node, quantity) in &input.demand {
        if !input.edges.iter().any(|e| e.to == node) {
            warn!(store = %input.nodes[node].id, demand = quantity, "store has no incoming edges");
        }
    }
}
