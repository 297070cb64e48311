//! Knowledge graph construction from flat fixture lists
//!
//! The fixture ships nodes and edges as flat arrays. The builder validates
//! them against the corpus, drops malformed edges (unknown endpoints,
//! self-loops), attaches document years, and derives average years for the
//! non-document nodes. When no graph fixture exists at all, a theme/document
//! graph is derived straight from the corpus theme tags.

use super::store::KnowledgeGraph;
use super::types::{NodeId, NodeKind};
use super::GraphNode;
use crate::corpus::{Corpus, DocId, GraphFixture};
use tracing::warn;

/// Builds a [`KnowledgeGraph`] from fixtures or the corpus itself
pub struct GraphBuilder;

impl GraphBuilder {
    /// Ingest the flat node/edge lists from `graph.json`
    pub fn from_fixture(fixture: &GraphFixture, corpus: &Corpus) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();

        for record in &fixture.nodes {
            let node = match record.kind {
                NodeKind::Document => {
                    let backing = record
                        .doc
                        .map(DocId::new)
                        .and_then(|d| corpus.get(d).map(|doc| (d, doc.year())));
                    match backing {
                        Some((doc_id, year)) => {
                            GraphNode::document(record.id, record.label.clone(), doc_id, year)
                        }
                        None => {
                            warn!(
                                id = record.id,
                                "document node has no matching corpus record"
                            );
                            GraphNode::new(record.id, NodeKind::Document, record.label.clone())
                        }
                    }
                }
                kind => GraphNode::new(record.id, kind, record.label.clone()),
            };
            graph.add_node(node);
        }

        for record in &fixture.edges {
            let source = NodeId::new(record.source);
            let target = NodeId::new(record.target);
            let weight = record.weight.unwrap_or(1);
            if let Err(e) = graph.add_edge(source, target, weight) {
                warn!("dropping fixture edge: {}", e);
            }
        }

        graph.recompute_derived();
        graph
    }

    /// Derive a theme/document graph from corpus theme tags
    ///
    /// Used when no `graph.json` fixture is present. Documents are numbered
    /// first, themes after, in corpus order.
    pub fn derive(corpus: &Corpus) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        let mut next_id: u64 = 1;

        for doc in corpus.documents() {
            graph.add_node(GraphNode::document(
                next_id,
                doc.title.clone(),
                doc.id,
                doc.year(),
            ));
            next_id += 1;
        }

        let mut themes: Vec<&str> = corpus.themes().collect();
        themes.sort_unstable();
        for theme in themes {
            let theme_node = graph.add_node(GraphNode::new(next_id, NodeKind::Theme, theme));
            next_id += 1;
            for &doc_id in corpus.docs_with_theme(theme) {
                if let Some(doc_node) = graph.node_for_doc(doc_id) {
                    if let Err(e) = graph.add_edge(theme_node, doc_node, 1) {
                        warn!("dropping derived edge: {}", e);
                    }
                }
            }
        }

        graph.recompute_derived();
        graph
    }
}
