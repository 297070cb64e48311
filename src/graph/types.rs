//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Node type in the knowledge graph
///
/// Serialized lowercase to match the fixture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Theme,
    Person,
    Event,
    Period,
    Document,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Theme => "theme",
            NodeKind::Person => "person",
            NodeKind::Event => "event",
            NodeKind::Period => "period",
            NodeKind::Document => "document",
        }
    }

    /// All kinds, in the lane order the timeline view stacks them
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Period,
        NodeKind::Event,
        NodeKind::Person,
        NodeKind::Theme,
        NodeKind::Document,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "NodeId(42)");
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&NodeKind::Theme).unwrap(), "\"theme\"");
        let kind: NodeKind = serde_json::from_str("\"person\"").unwrap();
        assert_eq!(kind, NodeKind::Person);
    }
}
