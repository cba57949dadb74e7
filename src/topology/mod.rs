//! Graph abstraction consumed by the planarity algorithms.

pub mod generators;
pub mod graph;
pub mod ids;
pub mod list_graph;
pub mod maps;

pub use graph::Graph;
pub use ids::{ArcId, EdgeId, NodeId};
pub use list_graph::ListGraph;
pub use maps::{ArcMap, EdgeMap, NodeMap};
