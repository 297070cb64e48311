//! Charkha — corpus knowledge-graph explorer
//!
//! Charkha loads the Collected Works of Mahatma Gandhi (~45,000 documents)
//! from static JSON fixtures and computes the three views the visualizer
//! front end renders:
//!
//! - a typed knowledge graph (themes, people, events, periods, documents)
//!   with derived temporal attributes and a timeline layout seed,
//! - a collapsible category → subcategory → theme → document hierarchy
//!   with a radial layout,
//! - a map "journey": documents grouped by geocoded location in
//!   chronological order, each stop carrying a theme-frequency cloud.
//!
//! # Architecture
//!
//! - `corpus` — document records, date normalization, fixture loading
//! - `graph` — knowledge graph store, average-year derivation, year filter
//! - `hierarchy` — taxonomy tree with expand/collapse state
//! - `journey` — location grouping and theme clouds
//! - `layout` — timeline and radial positioning seeds
//! - `http` — axum server exposing the views as JSON
//!
//! # Example Usage
//!
//! ```rust
//! use charkha::corpus::{Corpus, Document};
//! use charkha::graph::GraphBuilder;
//!
//! let docs = vec![
//!     Document::new(1, "Speech at Benares", "1916-02-04", Some("Benares"),
//!         ["Education", "Swaraj"], "..."),
//!     Document::new(2, "Letter to Tolstoy", "1909-10-01", Some("London"),
//!         ["Nonviolence"], "..."),
//! ];
//! let corpus = Corpus::from_documents(docs);
//!
//! // Derive a theme/document graph straight from the corpus
//! let graph = GraphBuilder::derive(&corpus);
//! assert_eq!(graph.node_count(), 5); // 2 documents + 3 themes
//! ```

#![warn(clippy::all)]

pub mod atlas;
pub mod config;
pub mod corpus;
pub mod graph;
pub mod hierarchy;
pub mod http;
pub mod journey;
pub mod layout;

// Re-export main types for convenience
pub use atlas::Atlas;
pub use config::ServerConfig;
pub use corpus::{Corpus, CorpusError, CorpusFixtures, CorpusLoader, DateKey, DocId, Document};
pub use graph::{GraphBuilder, GraphEdge, GraphError, GraphNode, KnowledgeGraph, NodeId, NodeKind};
pub use hierarchy::{HierarchyBuilder, Taxonomy, TreeError, TreeKind, TreeNode};
pub use http::HttpServer;
pub use journey::{Gazetteer, GeoPoint, Journey, JourneyPoint, LocationStop};
pub use layout::{PlacedNode, RadialLayout, RadialPlacement, TimelineLayout};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the version string
pub fn version() -> &'static str {
    VERSION
}
