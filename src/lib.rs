// Domain layer: network model, LP model, collaborator interfaces
pub mod domain;

// Application layer: network building, model compilation, result extraction
pub mod application;

// Infrastructure layer: input snapshots, routing estimators, logging
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, CoordinateRecord, EdgeFlow, EdgeRecord, FlowAssignment, FlowError,
    FlowPlan, InputError, LinearProgram, NetworkSource, Node, NodeRecord, ObjectiveWeighting,
    OptimizerConfig, Position, QuantityKind, RouteKind, RouteQuery, RoutingError, Solution,
    SolutionStatus, SolverBackend, SolverError, SolverService, SolverStatistics,
    SupplyChainNetwork, SupplyDemandRecord, Tier, TravelTimeEstimator, Variable, Weight,
    WeightPolicy,
};

pub use application::{FlowModelCompiler, FlowOptimizer, NetworkBuilder, ResultExtractor};

pub use infrastructure::{init_logging, FixedTravelTimes, HaversineEstimator, NetworkSnapshot};

pub use solver::{MicroLpSolver, SolverFactory};

#[cfg(feature = "highs")]
pub use solver::HighsSolver;

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
