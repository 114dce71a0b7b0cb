// Error taxonomy of an optimization run

use super::solver_service::SolverError;
use super::value_objects::{QuantityKind, SolutionStatus, Tier};

/// Missing or malformed input records; aborts the run before compilation
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Duplicate node '{0}'")]
    DuplicateNode(String),

    #[error("Duplicate coordinates for node '{0}'")]
    DuplicateCoordinates(String),

    #[error("Node '{0}' has no coordinates")]
    MissingCoordinates(String),

    #[error("Duplicate edge {origin} -> {destination}")]
    DuplicateEdge { origin: String, destination: String },

    #[error("Edge {origin} -> {destination} is a self loop")]
    SelfLoop { origin: String, destination: String },

    #[error("Edge {origin} -> {destination} references unknown node '{node}'")]
    DanglingEdge {
        origin: String,
        destination: String,
        node: String,
    },

    #[error("Edge {origin} -> {destination} runs against the tier order ({from} to {to})")]
    TierOrder {
        origin: String,
        destination: String,
        from: Tier,
        to: Tier,
    },

    #[error("Invalid {field} for {subject}: {value}")]
    InvalidNumber {
        subject: String,
        field: &'static str,
        value: f64,
    },

    #[error("{kind:?} record for unknown node '{node}'")]
    UnknownQuantityNode { node: String, kind: QuantityKind },

    #[error("{kind:?} record for node '{node}', which is a {tier}")]
    WrongTier {
        node: String,
        kind: QuantityKind,
        tier: Tier,
    },

    #[error("Duplicate {kind:?} record for node '{node}'")]
    DuplicateQuantity { node: String, kind: QuantityKind },

    #[error("Factory '{0}' has no supply record")]
    MissingSupply(String),

    #[error("Store '{0}' has no demand record")]
    MissingDemand(String),
}

/// Failure of the routing collaborator for one edge
///
/// Kept apart from a zero-minute answer, which is a valid travel time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error("destination unreachable")]
    Unreachable,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("no travel time known")]
    NotFound,
}

/// Run-level error
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("No travel time for {origin} -> {destination}: {reason}")]
    Weight {
        origin: String,
        destination: String,
        reason: String,
    },

    #[error("Status: {status} ({message})")]
    Model {
        status: SolutionStatus,
        message: String,
    },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FlowError {
    pub fn infeasible(message: impl Into<String>) -> Self {
        FlowError::Model {
            status: SolutionStatus::Infeasible,
            message: message.into(),
        }
    }

    /// Solver status carried by model errors
    pub fn status(&self) -> Option<SolutionStatus> {
        match self {
            FlowError::Model { status, .. } => Some(*status),
            FlowError::Solver(_) => Some(SolutionStatus::Error),
            _ => None,
        }
    }
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;
