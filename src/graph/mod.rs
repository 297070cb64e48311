//! Knowledge graph: typed nodes, collapsed edges, derived years, filtering

pub mod builder;
pub mod edge;
pub mod filter;
pub mod node;
pub mod store;
pub mod types;

pub use builder::GraphBuilder;
pub use edge::GraphEdge;
pub use node::GraphNode;
pub use store::{GraphError, GraphResult, KnowledgeGraph};
pub use types::{NodeId, NodeKind};
