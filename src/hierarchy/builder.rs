//! Hierarchy construction from the taxonomy fixture
//!
//! The taxonomy fixture gives the category → subcategory → theme skeleton;
//! documents attach under every theme they carry. Themes tagged on
//! documents but absent from the taxonomy are parked under an
//! "Uncategorized" category so the tree accounts for every document.

use super::node::{TreeKind, TreeNode};
use crate::corpus::{Corpus, DocId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The `taxonomy.json` fixture
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Taxonomy {
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<SubcategorySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubcategorySpec {
    pub name: String,
    #[serde(default)]
    pub themes: Vec<String>,
}

/// Builds the collapsible hierarchy
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    /// Build the full tree; `doc_count` on every internal node is the
    /// number of distinct documents in its subtree.
    pub fn build(corpus: &Corpus, taxonomy: Option<&Taxonomy>) -> TreeNode {
        let mut root = TreeNode::new("corpus", TreeKind::Root);
        let mut placed: HashSet<&str> = HashSet::new();
        let mut all_docs: HashSet<DocId> = HashSet::new();

        if let Some(taxonomy) = taxonomy {
            for category in &taxonomy.categories {
                let mut cat_node = TreeNode::new(&category.name, TreeKind::Category);
                let mut cat_docs: HashSet<DocId> = HashSet::new();

                for sub in &category.subcategories {
                    let mut sub_node = TreeNode::new(&sub.name, TreeKind::Subcategory);
                    let mut sub_docs: HashSet<DocId> = HashSet::new();

                    for theme in &sub.themes {
                        placed.insert(theme.as_str());
                        let (theme_node, docs) = Self::theme_node(corpus, theme);
                        sub_docs.extend(&docs);
                        sub_node.children.push(theme_node);
                    }

                    sub_node.doc_count = sub_docs.len();
                    cat_docs.extend(&sub_docs);
                    cat_node.children.push(sub_node);
                }

                cat_node.doc_count = cat_docs.len();
                all_docs.extend(&cat_docs);
                root.children.push(cat_node);
            }
        }

        let mut leftover: Vec<&str> = corpus
            .themes()
            .filter(|t| !placed.contains(t))
            .collect();
        leftover.sort_unstable();

        if !leftover.is_empty() {
            let mut misc = TreeNode::new("Uncategorized", TreeKind::Category);
            let mut misc_docs: HashSet<DocId> = HashSet::new();
            for theme in leftover {
                let (theme_node, docs) = Self::theme_node(corpus, theme);
                misc_docs.extend(&docs);
                misc.children.push(theme_node);
            }
            misc.doc_count = misc_docs.len();
            all_docs.extend(&misc_docs);
            root.children.push(misc);
        }

        root.doc_count = all_docs.len();
        root
    }

    /// Theme node with its documents attached in chronological order
    fn theme_node(corpus: &Corpus, theme: &str) -> (TreeNode, HashSet<DocId>) {
        let mut node = TreeNode::new(theme, TreeKind::Theme);

        let mut docs: Vec<&crate::corpus::Document> = corpus
            .docs_with_theme(theme)
            .iter()
            .filter_map(|&id| corpus.get(id))
            .collect();
        docs.sort_by_key(|d| d.sort_key());

        let mut seen: HashSet<DocId> = HashSet::new();
        for doc in docs {
            if seen.insert(doc.id) {
                node.children.push(TreeNode::document(doc.title.clone(), doc.id));
            }
        }
        node.doc_count = seen.len();
        (node, seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new(1, "Hind Swaraj", "1909-11", None, ["Swaraj"], ""),
            Document::new(2, "Khadi appeal", "1921", None, ["Khadi", "Swaraj"], ""),
            Document::new(3, "Stray note", "1930", None, ["Diet"], ""),
        ])
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            categories: vec![CategorySpec {
                name: "Politics".into(),
                subcategories: vec![SubcategorySpec {
                    name: "Independence".into(),
                    themes: vec!["Swaraj".into(), "Khadi".into()],
                }],
            }],
        }
    }

    #[test]
    fn test_build_with_taxonomy() {
        let tree = HierarchyBuilder::build(&corpus(), Some(&taxonomy()));

        let politics = tree.find(&["Politics".to_string()]).unwrap();
        assert_eq!(politics.kind, TreeKind::Category);
        // doc 2 carries both themes but counts once per subtree
        assert_eq!(politics.doc_count, 2);

        let swaraj = tree
            .find(&["Politics".to_string(), "Independence".to_string(), "Swaraj".to_string()])
            .unwrap();
        assert_eq!(swaraj.doc_count, 2);
        // chronological order within the theme
        let titles: Vec<&str> = swaraj.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(titles, vec!["Hind Swaraj", "Khadi appeal"]);
    }

    #[test]
    fn test_unlisted_theme_goes_uncategorized() {
        let tree = HierarchyBuilder::build(&corpus(), Some(&taxonomy()));
        let misc = tree.find(&["Uncategorized".to_string()]).unwrap();
        assert_eq!(misc.children.len(), 1);
        assert_eq!(misc.children[0].name, "Diet");
        assert_eq!(misc.doc_count, 1);
    }

    #[test]
    fn test_build_without_taxonomy() {
        let tree = HierarchyBuilder::build(&corpus(), None);
        // everything lands under Uncategorized
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.doc_count, 3);
        let misc = &tree.children[0];
        assert_eq!(misc.children.len(), 3); // Diet, Khadi, Swaraj
    }

    #[test]
    fn test_shared_document_counted_once_at_root() {
        let tree = HierarchyBuilder::build(&corpus(), Some(&taxonomy()));
        assert_eq!(tree.doc_count, 3);
    }
}
