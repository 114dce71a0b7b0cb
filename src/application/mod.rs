// Application layer: builds the network, compiles the flow model, runs the
// solver and extracts flows

pub mod builder;
pub mod compiler;
pub mod extractor;
pub mod mappers;
pub mod optimizer;

pub use builder::NetworkBuilder;
pub use compiler::{CompiledModel, FlowModelCompiler};
pub use extractor::ResultExtractor;
pub use mappers::{network_input, EdgeSpec, NetworkInput};
pub use optimizer::FlowOptimizer;
