//! Year-range filtering
//!
//! The one invariant the views depend on: a filtered graph never contains
//! an edge with an endpoint outside its node set. Filtering therefore
//! decides node survival first and only then copies edges whose endpoints
//! both survived.

use super::store::KnowledgeGraph;
use super::types::NodeId;
use std::collections::HashSet;
use tracing::warn;

impl KnowledgeGraph {
    /// Restrict the graph to documents dated within `[from, to]`
    ///
    /// - Document nodes survive iff their year is inside the range
    ///   (undated documents are dropped).
    /// - Other nodes survive iff at least one adjacent document survives,
    ///   so no theme floats without a visible document.
    /// - An edge survives iff both endpoints survive.
    ///
    /// `from > to` yields an empty graph. Derived attributes are recomputed
    /// over the surviving neighborhood.
    pub fn filter_years(&self, from: i32, to: i32) -> KnowledgeGraph {
        let mut out = KnowledgeGraph::new();
        if from > to {
            return out;
        }

        let surviving_docs: HashSet<NodeId> = self
            .nodes()
            .filter(|n| n.is_document())
            .filter(|n| n.year().map(|y| (from..=to).contains(&y)).unwrap_or(false))
            .map(|n| n.id)
            .collect();

        for node in self.nodes() {
            let keep = if node.is_document() {
                surviving_docs.contains(&node.id)
            } else {
                self.neighbors(node.id)
                    .iter()
                    .any(|n| surviving_docs.contains(n))
            };
            if keep {
                out.add_node(node.clone());
            }
        }

        for edge in self.edges() {
            if out.contains(edge.source) && out.contains(edge.target) {
                if let Err(e) = out.add_edge(edge.source, edge.target, edge.weight) {
                    warn!("edge lost during filtering: {}", e);
                }
            }
        }

        out.recompute_derived();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DocId;
    use crate::graph::{GraphNode, NodeKind};

    /// theme(1) — doc(2, 1916), doc(3, 1924), doc(4, undated);
    /// theme(5) — doc(4) only; theme(1) — theme(5)
    fn graph() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        g.add_node(GraphNode::new(1, NodeKind::Theme, "Education"));
        g.add_node(GraphNode::document(2, "a", DocId::new(10), Some(1916)));
        g.add_node(GraphNode::document(3, "b", DocId::new(11), Some(1924)));
        g.add_node(GraphNode::document(4, "c", DocId::new(12), None));
        g.add_node(GraphNode::new(5, NodeKind::Theme, "Khadi"));
        g.add_edge(NodeId::new(1), NodeId::new(2), 1).unwrap();
        g.add_edge(NodeId::new(1), NodeId::new(3), 1).unwrap();
        g.add_edge(NodeId::new(1), NodeId::new(4), 1).unwrap();
        g.add_edge(NodeId::new(5), NodeId::new(4), 1).unwrap();
        g.add_edge(NodeId::new(1), NodeId::new(5), 1).unwrap();
        g.recompute_derived();
        g
    }

    #[test]
    fn test_no_orphaned_edges() {
        let g = graph();
        for (lo, hi) in [(1900, 1950), (1916, 1916), (1920, 1930), (1800, 1810)] {
            let f = g.filter_years(lo, hi);
            for edge in f.edges() {
                assert!(f.contains(edge.source), "orphaned source in [{}, {}]", lo, hi);
                assert!(f.contains(edge.target), "orphaned target in [{}, {}]", lo, hi);
            }
        }
    }

    #[test]
    fn test_undated_documents_dropped() {
        let f = graph().filter_years(1900, 1950);
        assert!(!f.contains(NodeId::new(4)));
        // Khadi's only document was undated, so the theme goes too,
        // taking the theme-theme edge with it
        assert!(!f.contains(NodeId::new(5)));
        assert_eq!(f.node_count(), 3);
        assert_eq!(f.edge_count(), 2);
    }

    #[test]
    fn test_avg_year_recomputed_on_survivors() {
        let f = graph().filter_years(1920, 1930);
        // only the 1924 document survives under the theme
        assert_eq!(f.node(NodeId::new(1)).unwrap().avg_year, Some(1924.0));
        assert_eq!(f.node(NodeId::new(1)).unwrap().doc_count, 1);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let f = graph().filter_years(1950, 1900);
        assert_eq!(f.node_count(), 0);
        assert_eq!(f.edge_count(), 0);
    }
}
