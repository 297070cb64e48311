//! Edge implementation for the knowledge graph

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A connection between two graph nodes
///
/// Edges are undirected for layout purposes; `source`/`target` keep the
/// fixture's orientation. Parallel edges are collapsed at build time with
/// their weights summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: u32,
}

impl GraphEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: u32) -> Self {
        GraphEdge {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Endpoint pair normalized so (a, b) and (b, a) compare equal
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_orientation_free() {
        let ab = GraphEdge::new(1, 2, 1);
        let ba = GraphEdge::new(2, 1, 1);
        assert_eq!(ab.key(), ba.key());
    }
}
