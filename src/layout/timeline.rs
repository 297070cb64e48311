//! Timeline layout seed for the force view
//!
//! x maps a node's average year linearly onto the drawing width; y is a
//! fixed lane per node kind (periods on top, documents at the bottom).
//! Positions are deterministic so the force simulation starts from the
//! same seed on every load.

use crate::graph::{KnowledgeGraph, NodeId, NodeKind};
use serde::Serialize;

const DEFAULT_MARGIN: f64 = 40.0;

/// A node with its seed position
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Timeline layout parameters
#[derive(Debug, Clone, Copy)]
pub struct TimelineLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl TimelineLayout {
    pub fn new(width: f64, height: f64) -> Self {
        TimelineLayout {
            width,
            height,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Lane index of a kind, top to bottom
    fn lane(kind: NodeKind) -> usize {
        NodeKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)
    }

    /// Place every node in the graph
    ///
    /// Nodes without a year — and all nodes when the graph's year range is
    /// a single point — pin to the horizontal center.
    pub fn place(&self, graph: &KnowledgeGraph) -> Vec<PlacedNode> {
        let range = graph.year_range();
        let inner = self.width - 2.0 * self.margin;
        let lanes = NodeKind::ALL.len() as f64;

        graph
            .nodes()
            .map(|node| {
                let x = match (node.avg_year, range) {
                    (Some(y), Some((lo, hi))) if hi > lo => {
                        self.margin + (y - lo) / (hi - lo) * inner
                    }
                    _ => self.width / 2.0,
                };
                let y = self.height * (Self::lane(node.kind) as f64 + 0.5) / lanes;
                PlacedNode { id: node.id, x, y }
            })
            .collect()
    }
}
