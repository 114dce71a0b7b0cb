// Infrastructure layer: input files, routing collaborators, logging

pub mod logging;
pub mod routing;
pub mod snapshot;

pub use logging::init_logging;
pub use routing::{FixedTravelTimes, HaversineEstimator};
pub use snapshot::NetworkSnapshot;
