//! Atlas: every view computed from one set of fixtures

use crate::corpus::{Corpus, CorpusFixtures};
use crate::graph::{GraphBuilder, KnowledgeGraph};
use crate::hierarchy::{HierarchyBuilder, TreeNode};
use crate::journey::{Gazetteer, Journey};

/// The loaded corpus plus all three computed views
///
/// Built once at startup; the HTTP handlers only read it (year filters and
/// depth cuts are computed per request).
#[derive(Debug, Clone)]
pub struct Atlas {
    pub corpus: Corpus,
    pub graph: KnowledgeGraph,
    pub tree: TreeNode,
    pub journey: Journey,
    pub gazetteer: Gazetteer,
}

impl Atlas {
    /// Compute all views from loaded fixtures
    pub fn from_fixtures(fixtures: CorpusFixtures) -> Self {
        let CorpusFixtures {
            corpus,
            graph,
            taxonomy,
            gazetteer,
        } = fixtures;

        let graph = match &graph {
            Some(fixture) => GraphBuilder::from_fixture(fixture, &corpus),
            None => GraphBuilder::derive(&corpus),
        };
        let tree = HierarchyBuilder::build(&corpus, taxonomy.as_ref());
        let journey = Journey::build(&corpus, &gazetteer);

        Atlas {
            corpus,
            graph,
            tree,
            journey,
            gazetteer,
        }
    }
}
