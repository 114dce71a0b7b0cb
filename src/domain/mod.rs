// Domain module: network model, LP model and collaborator interfaces

pub mod assignment;
pub mod config;
pub mod errors;
pub mod models;
pub mod network;
pub mod records;
pub mod routing;
pub mod solver_service;
pub mod value_objects;

pub use assignment::*;
pub use config::*;
pub use errors::*;
pub use models::*;
pub use network::*;
pub use records::*;
pub use routing::*;
pub use solver_service::{SolverError, SolverService};
pub use value_objects::*;
