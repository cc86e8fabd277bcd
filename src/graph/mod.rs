//! Threshold graph representation and construction

pub mod builder;
pub mod compressed;
pub mod threshold;

pub use compressed::ThresholdGraph;
pub use threshold::build_graph;
