//! Node implementation for the knowledge graph

use super::types::{NodeId, NodeKind};
use crate::corpus::DocId;
use serde::{Deserialize, Serialize};

/// A node in the knowledge graph
///
/// Document nodes carry their own year as `avg_year`; theme/person/event/
/// period nodes get `avg_year` derived from the dated documents they are
/// connected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Node type
    pub kind: NodeKind,

    /// Display label
    pub label: String,

    /// Mean year of connected dated documents (own year for documents)
    pub avg_year: Option<f64>,

    /// Number of adjacent document nodes (used for sizing)
    pub doc_count: usize,

    /// Backing document, for `kind == Document`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocId>,
}

impl GraphNode {
    /// Create a node with no derived attributes yet
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, label: impl Into<String>) -> Self {
        GraphNode {
            id: id.into(),
            kind,
            label: label.into(),
            avg_year: None,
            doc_count: 0,
            doc: None,
        }
    }

    /// Create a document node backed by a corpus record
    pub fn document(id: impl Into<NodeId>, label: impl Into<String>, doc: DocId, year: Option<i32>) -> Self {
        GraphNode {
            id: id.into(),
            kind: NodeKind::Document,
            label: label.into(),
            avg_year: year.map(f64::from),
            doc_count: 1,
            doc: Some(doc),
        }
    }

    pub fn is_document(&self) -> bool {
        self.kind == NodeKind::Document
    }

    /// Year as an integer, for filtering
    pub fn year(&self) -> Option<i32> {
        self.avg_year.map(|y| y.round() as i32)
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GraphNode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_node_year() {
        let node = GraphNode::document(1, "Hind Swaraj", DocId::new(10), Some(1909));
        assert!(node.is_document());
        assert_eq!(node.avg_year, Some(1909.0));
        assert_eq!(node.year(), Some(1909));
    }

    #[test]
    fn test_plain_node_starts_underived() {
        let node = GraphNode::new(2, NodeKind::Theme, "Nonviolence");
        assert_eq!(node.avg_year, None);
        assert_eq!(node.doc_count, 0);
        assert!(!node.is_document());
    }

    #[test]
    fn test_equality_by_id() {
        let a = GraphNode::new(3, NodeKind::Person, "Kasturba");
        let b = GraphNode::new(3, NodeKind::Theme, "Different");
        assert_eq!(a, b);
    }
}
