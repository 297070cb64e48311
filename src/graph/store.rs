//! In-memory knowledge graph storage
//!
//! Hash maps and adjacency lists, sized for a corpus of ~45k documents:
//! - nodes: NodeId -> GraphNode (insertion-ordered, so serialized output
//!   is stable across runs)
//! - edges: flat list with parallel edges collapsed
//! - adjacency: NodeId -> neighbor list (undirected)
//! - kind_index: NodeKind -> node ids

use super::edge::GraphEdge;
use super::node::GraphNode;
use super::types::{NodeId, NodeKind};
use crate::corpus::DocId;
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during graph mutation
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("edge endpoint {0} does not exist")]
    UnknownEndpoint(NodeId),

    #[error("self-loop on {0} is not allowed")]
    SelfLoop(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// The knowledge graph store
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: IndexMap<NodeId, GraphNode>,
    edges: Vec<GraphEdge>,
    /// Normalized endpoint pair -> index into `edges`
    edge_slots: HashMap<(NodeId, NodeId), usize>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    kind_index: HashMap<NodeKind, Vec<NodeId>>,
    doc_nodes: HashMap<DocId, NodeId>,
}

impl KnowledgeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; a duplicate id replaces the earlier node with a warning
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let id = node.id;
        if let Some(doc) = node.doc {
            self.doc_nodes.insert(doc, id);
        }
        if let Some(old) = self.nodes.insert(id, node) {
            warn!(id = id.as_u64(), "duplicate graph node id, keeping last");
            if let Some(ids) = self.kind_index.get_mut(&old.kind) {
                ids.retain(|n| *n != id);
            }
        }
        // nodes map owns the entry now; re-read the kind we just stored
        let kind = self.nodes[&id].kind;
        self.kind_index.entry(kind).or_default().push(id);
        id
    }

    /// Insert an edge between existing nodes
    ///
    /// Self-loops are rejected; a parallel edge folds its weight into the
    /// existing one.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: u32) -> GraphResult<()> {
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::UnknownEndpoint(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::UnknownEndpoint(target));
        }

        let edge = GraphEdge::new(source, target, weight);
        match self.edge_slots.get(&edge.key()) {
            Some(&slot) => {
                self.edges[slot].weight += weight;
            }
            None => {
                self.edge_slots.insert(edge.key(), self.edges.len());
                self.edges.push(edge);
                self.adjacency.entry(source).or_default().push(target);
                self.adjacency.entry(target).or_default().push(source);
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Neighbors of a node (undirected, one entry per connected node)
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes_by_kind(&self, kind: NodeKind) -> &[NodeId] {
        self.kind_index.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Graph node standing for a corpus document
    pub fn node_for_doc(&self, doc: DocId) -> Option<NodeId> {
        self.doc_nodes.get(&doc).copied()
    }

    /// Min/max over node average years
    pub fn year_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for node in self.nodes.values() {
            if let Some(y) = node.avg_year {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                    None => (y, y),
                });
            }
        }
        range
    }

    /// Recompute `avg_year` and `doc_count` on every non-document node
    ///
    /// A node's average year is the mean year over its *dated* document
    /// neighbors; nodes with no dated document neighbor get `None`.
    pub fn recompute_derived(&mut self) {
        let mut updates: Vec<(NodeId, Option<f64>, usize)> = Vec::new();

        for node in self.nodes.values() {
            if node.is_document() {
                continue;
            }
            let mut sum = 0.0;
            let mut dated = 0usize;
            let mut docs = 0usize;
            for &n in self.neighbors(node.id) {
                if let Some(neighbor) = self.nodes.get(&n) {
                    if neighbor.is_document() {
                        docs += 1;
                        if let Some(y) = neighbor.avg_year {
                            sum += y;
                            dated += 1;
                        }
                    }
                }
            }
            let avg = if dated > 0 { Some(sum / dated as f64) } else { None };
            updates.push((node.id, avg, docs));
        }

        for (id, avg, docs) in updates {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.avg_year = avg;
                node.doc_count = docs;
            }
        }
    }
}
