// Domain value objects representing core business concepts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a node in the supply chain
///
/// Tiers are ordered: goods move from factories towards stores, possibly
/// through several warehouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Produces goods, bounded by its supply
    Factory,
    /// Intermediate node, conserves flow
    Warehouse,
    /// Consumes goods, must receive exactly its demand
    Store,
}

impl Tier {
    /// Whether an edge from `self` to `to` respects the tier order
    pub fn can_ship_to(self, to: Tier) -> bool {
        !matches!(to, Tier::Factory) && !matches!(self, Tier::Store)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Factory => write!(f, "Factory"),
            Tier::Warehouse => write!(f, "Warehouse"),
            Tier::Store => write!(f, "Store"),
        }
    }
}

/// Kind of a supply/demand record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityKind {
    Supply,
    Demand,
}

/// Classification of a route by the tiers of its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    FactoryToWarehouse,
    WarehouseToWarehouse,
    WarehouseToStore,
    FactoryToStore,
}

impl RouteKind {
    pub fn between(from: Tier, to: Tier) -> Option<Self> {
        match (from, to) {
            (Tier::Factory, Tier::Warehouse) => Some(RouteKind::FactoryToWarehouse),
            (Tier::Warehouse, Tier::Warehouse) => Some(RouteKind::WarehouseToWarehouse),
            (Tier::Warehouse, Tier::Store) => Some(RouteKind::WarehouseToStore),
            (Tier::Factory, Tier::Store) => Some(RouteKind::FactoryToStore),
            _ => None,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::FactoryToWarehouse => write!(f, "factory_to_warehouse"),
            RouteKind::WarehouseToWarehouse => write!(f, "warehouse_to_warehouse"),
            RouteKind::WarehouseToStore => write!(f, "warehouse_to_store"),
            RouteKind::FactoryToStore => write!(f, "factory_to_store"),
        }
    }
}

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// How far `lhs` is from satisfying `lhs <op> bound`, zero when satisfied
    pub fn violation(self, lhs: f64, bound: f64) -> f64 {
        match self {
            ConstraintType::LessThanOrEqual => (lhs - bound).max(0.0),
            ConstraintType::Equal => (lhs - bound).abs(),
            ConstraintType::GreaterThanOrEqual => (bound - lhs).max(0.0),
        }
    }
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Solver error occurred
    Error,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::Error => write!(f, "Error"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// HiGHS when compiled in, otherwise the pure-Rust simplex
    #[default]
    Auto,
    /// Pure-Rust simplex (microlp through good_lp)
    MicroLp,
    /// HiGHS solver
    Highs,
    /// COIN-OR CBC solver
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::MicroLp => write!(f, "microlp"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}
