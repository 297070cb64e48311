//! Corpus data model and fixture loading
//!
//! The corpus is loaded once from static JSON fixtures and then only read.
//! `Corpus` keeps the flat document list plus the lookup indexes every view
//! needs: by id, by theme, and by location (location index preserves
//! first-seen order, which the journey view relies on).

pub mod document;
pub mod loader;
pub mod types;

pub use document::{parse_date, DateKey, Document};
pub use loader::{CorpusError, CorpusFixtures, CorpusLoader, EdgeRecord, GraphFixture, NodeRecord};
pub use types::DocId;

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::warn;

/// The loaded document corpus with lookup indexes
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    by_id: HashMap<DocId, usize>,
    theme_index: HashMap<String, Vec<DocId>>,
    location_index: IndexMap<String, Vec<DocId>>,
}

impl Corpus {
    /// Build a corpus from a flat document list
    ///
    /// Duplicate ids keep the last record; earlier ones are replaced with a
    /// warning.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut deduped: Vec<Document> = Vec::with_capacity(documents.len());
        let mut by_id: HashMap<DocId, usize> = HashMap::with_capacity(documents.len());

        for doc in documents {
            if let Some(&slot) = by_id.get(&doc.id) {
                warn!(id = doc.id.as_u64(), "duplicate document id, keeping last");
                deduped[slot] = doc;
            } else {
                by_id.insert(doc.id, deduped.len());
                deduped.push(doc);
            }
        }

        let mut theme_index: HashMap<String, Vec<DocId>> = HashMap::new();
        let mut location_index: IndexMap<String, Vec<DocId>> = IndexMap::new();
        for doc in &deduped {
            for theme in &doc.themes {
                theme_index.entry(theme.clone()).or_default().push(doc.id);
            }
            if let Some(loc) = &doc.location {
                location_index.entry(loc.clone()).or_default().push(doc.id);
            }
        }

        Corpus {
            documents: deduped,
            by_id,
            theme_index,
            location_index,
        }
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by id
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.by_id.get(&id).map(|&i| &self.documents[i])
    }

    /// All documents in fixture order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// All distinct themes
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.theme_index.keys().map(String::as_str)
    }

    /// Documents carrying a theme
    pub fn docs_with_theme(&self, theme: &str) -> &[DocId] {
        self.theme_index.get(theme).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Documents written at a location
    pub fn docs_at_location(&self, location: &str) -> &[DocId] {
        self.location_index
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Locations in first-seen order
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.location_index.keys().map(String::as_str)
    }

    /// Min/max year over all dated documents
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut range: Option<(i32, i32)> = None;
        for doc in &self.documents {
            if let Some(y) = doc.year() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                    None => (y, y),
                });
            }
        }
        range
    }
}
