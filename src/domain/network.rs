// Supply-chain network: a directed graph of tiered nodes whose edges carry
// capacity, unit cost and a travel-time weight.

use super::value_objects::{RouteKind, Tier};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres
    pub fn haversine_km(&self, other: &Position) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub tier: Tier,
    pub position: Position,
}

/// Travel-time weight of an edge, in minutes
#[derive(Debug, Clone, PartialEq)]
pub enum Weight {
    Resolved(f64),
    /// Substituted constant after a failed lookup
    Fallback { minutes: f64, reason: String },
    Unresolved(String),
}

impl Weight {
    pub fn minutes(&self) -> Option<f64> {
        match self {
            Weight::Resolved(minutes) | Weight::Fallback { minutes, .. } => Some(*minutes),
            Weight::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Weight::Resolved(_))
    }
}

/// Edge attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// upper bound on flow
    pub capacity: f64,
    /// cost per unit of flow
    pub cost: f64,
    pub weight: Weight,
}

/// Directed supply-chain graph with supply and demand attached to nodes
///
/// Node and edge indices follow input order, so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct SupplyChainNetwork {
    graph: DiGraph<Node, Route>,
    index: HashMap<String, NodeIndex>,
    supply: BTreeMap<NodeIndex, f64>,
    demand: BTreeMap<NodeIndex, f64>,
}

impl SupplyChainNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_node(&mut self, node: Node) -> NodeIndex {
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    pub(crate) fn add_route(&mut self, from: NodeIndex, to: NodeIndex, route: Route) -> EdgeIndex {
        self.graph.add_edge(from, to, route)
    }

    pub(crate) fn set_supply(&mut self, node: NodeIndex, quantity: f64) {
        self.supply.insert(node, quantity);
    }

    pub(crate) fn set_demand(&mut self, node: NodeIndex, quantity: f64) {
        self.demand.insert(node, quantity);
    }

    pub fn graph(&self) -> &DiGraph<Node, Route> {
        &self.graph
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn route(&self, edge: EdgeIndex) -> &Route {
        &self.graph[edge]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes of one tier, in input order
    pub fn nodes_of(&self, tier: Tier) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |&idx| self.graph[idx].tier == tier)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn endpoints(&self, edge: EdgeIndex) -> Option<(&Node, &Node)> {
        let (from, to) = self.graph.edge_endpoints(edge)?;
        Some((&self.graph[from], &self.graph[to]))
    }

    pub fn route_kind(&self, edge: EdgeIndex) -> Option<RouteKind> {
        let (from, to) = self.endpoints(edge)?;
        RouteKind::between(from.tier, to.tier)
    }

    /// Edges leaving (`Outgoing`) or entering (`Incoming`) a node, in edge order
    pub fn incident_edges(&self, node: NodeIndex, direction: Direction) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(node, direction)
            .map(|e| e.id())
            .collect();
        edges.sort();
        edges
    }

    pub fn supply(&self, node: NodeIndex) -> Option<f64> {
        self.supply.get(&node).copied()
    }

    pub fn demand(&self, node: NodeIndex) -> Option<f64> {
        self.demand.get(&node).copied()
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.values().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.values().sum()
    }

    /// Edges whose weight could not be resolved
    pub fn unresolved_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edge_indices()
            .filter(move |&e| self.graph[e].weight.minutes().is_none())
    }

    /// Mean position of all nodes, used to centre a map
    pub fn centroid(&self) -> Option<Position> {
        let n = self.graph.node_count();
        if n == 0 {
            return None;
        }
        let (lat, lon) = self
            .graph
            .node_weights()
            .fold((0.0, 0.0), |(lat, lon), node| {
                (lat + node.position.latitude, lon + node.position.longitude)
            });
        Some(Position::new(lat / n as f64, lon / n as f64))
    }
}
