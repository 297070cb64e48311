//! Fixture loading
//!
//! The visualizer consumes four static JSON fixtures from a data directory:
//!
//! - `documents.json` — flat document array (required)
//! - `graph.json` — flat node/edge lists for the knowledge graph (optional;
//!   the graph is derived from theme tags when absent)
//! - `taxonomy.json` — category → subcategory → theme tree (optional)
//! - `places.json` — location name → lat/lon gazetteer (optional)
//!
//! Parse and I/O errors always carry the offending path.

use super::document::Document;
use super::Corpus;
use crate::graph::NodeKind;
use crate::hierarchy::Taxonomy;
use crate::journey::{Gazetteer, GeoPoint};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading fixtures
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("missing required fixture {0}")]
    MissingFixture(PathBuf),
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// One document entry in `documents.json`
#[derive(Debug, Deserialize)]
struct DocumentRecord {
    id: u64,
    title: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    text: String,
}

impl DocumentRecord {
    fn into_document(self) -> Document {
        Document::new(
            self.id,
            self.title,
            self.date,
            self.location.as_deref(),
            self.themes,
            self.text,
        )
    }
}

/// One node entry in `graph.json`
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub kind: NodeKind,
    pub label: String,
    /// Document id this node stands for, for `kind == document`
    #[serde(default)]
    pub doc: Option<u64>,
}

/// One edge entry in `graph.json`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EdgeRecord {
    pub source: u64,
    pub target: u64,
    #[serde(default)]
    pub weight: Option<u32>,
}

/// Flat node/edge lists as shipped in `graph.json`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GraphFixture {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Everything loaded from a fixture directory
#[derive(Debug, Clone)]
pub struct CorpusFixtures {
    pub corpus: Corpus,
    pub graph: Option<GraphFixture>,
    pub taxonomy: Option<Taxonomy>,
    pub gazetteer: Gazetteer,
}

/// Loader for the static fixture directory
pub struct CorpusLoader;

impl CorpusLoader {
    /// Load all fixtures from a directory
    ///
    /// `documents.json` is required; the other fixtures degrade gracefully
    /// when absent.
    pub fn load_dir(dir: impl AsRef<Path>) -> CorpusResult<CorpusFixtures> {
        let dir = dir.as_ref();

        let docs_path = dir.join("documents.json");
        if !docs_path.exists() {
            return Err(CorpusError::MissingFixture(docs_path));
        }
        let records: Vec<DocumentRecord> = read_json(&docs_path)?;
        let corpus = Corpus::from_documents(records.into_iter().map(DocumentRecord::into_document).collect());

        let graph: Option<GraphFixture> = read_optional(dir.join("graph.json"))?;
        let taxonomy: Option<Taxonomy> = read_optional(dir.join("taxonomy.json"))?;
        let gazetteer = match read_optional::<HashMap<String, GeoPoint>>(dir.join("places.json"))? {
            Some(places) => Gazetteer::from_map(places),
            None => Gazetteer::default(),
        };

        info!(
            documents = corpus.len(),
            graph_nodes = graph.as_ref().map(|g| g.nodes.len()).unwrap_or(0),
            places = gazetteer.len(),
            "loaded fixtures from {}",
            dir.display()
        );

        Ok(CorpusFixtures {
            corpus,
            graph,
            taxonomy,
            gazetteer,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CorpusResult<T> {
    let data = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional<T: DeserializeOwned>(path: PathBuf) -> CorpusResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(&path).map(Some)
}
