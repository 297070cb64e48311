//! Tree nodes with expand/collapse state
//!
//! A collapsed subtree is still owned by its node — children are parked on
//! `collapsed` and excluded from visible walks and layout, mirroring the
//! `children` / `_children` split the visualizer front end works with.

use crate::corpus::DocId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Level of a node in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    Root,
    Category,
    Subcategory,
    Theme,
    Document,
}

/// Errors from tree navigation
#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("no node at path {0:?}")]
    UnknownPath(Vec<String>),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// A node in the category → subcategory → theme → document hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: TreeKind,

    /// Distinct documents in this subtree
    pub doc_count: usize,

    /// Backing document, for `kind == Document`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocId>,

    /// Visible children
    #[serde(default)]
    pub children: Vec<TreeNode>,

    /// Parked children of a collapsed node
    #[serde(default)]
    pub collapsed: Vec<TreeNode>,
}

/// Serialized view of the visible tree
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeView {
    pub name: String,
    pub kind: TreeKind,
    pub doc_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocId>,
    /// True when this node has a parked subtree
    pub collapsed: bool,
    pub children: Vec<TreeView>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, kind: TreeKind) -> Self {
        TreeNode {
            name: name.into(),
            kind,
            doc_count: 0,
            doc: None,
            children: Vec::new(),
            collapsed: Vec::new(),
        }
    }

    /// Leaf node for a single document
    pub fn document(name: impl Into<String>, doc: DocId) -> Self {
        TreeNode {
            name: name.into(),
            kind: TreeKind::Document,
            doc_count: 1,
            doc: Some(doc),
            children: Vec::new(),
            collapsed: Vec::new(),
        }
    }

    /// A node is collapsed when its children are parked
    pub fn is_collapsed(&self) -> bool {
        !self.collapsed.is_empty()
    }

    /// Park the children; idempotent, no-op on leaves
    pub fn collapse(&mut self) {
        if self.collapsed.is_empty() {
            self.collapsed = std::mem::take(&mut self.children);
        }
    }

    /// Restore parked children; idempotent
    pub fn expand(&mut self) {
        if self.children.is_empty() {
            self.children = std::mem::take(&mut self.collapsed);
        }
    }

    pub fn toggle(&mut self) {
        if self.is_collapsed() {
            self.expand();
        } else {
            self.collapse();
        }
    }

    /// Expand every node in the subtree
    pub fn expand_all(&mut self) {
        self.expand();
        for child in &mut self.children {
            child.expand_all();
        }
    }

    /// Collapse every node deeper than `depth` levels below this one
    ///
    /// `collapse_to_depth(0)` parks this node's own children.
    pub fn collapse_to_depth(&mut self, depth: usize) {
        if depth == 0 {
            // expand first so repeated calls always park the full subtree
            self.expand();
            self.collapse();
            return;
        }
        self.expand();
        for child in &mut self.children {
            child.collapse_to_depth(depth - 1);
        }
    }

    /// Find a node by name path below this one; empty path is this node
    pub fn find(&self, path: &[String]) -> Option<&TreeNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .children
                .iter()
                .chain(self.collapsed.iter())
                .find(|c| &c.name == head)
                .and_then(|c| c.find(rest)),
        }
    }

    fn find_mut(&mut self, path: &[String]) -> Option<&mut TreeNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .children
                .iter_mut()
                .chain(self.collapsed.iter_mut())
                .find(|c| &c.name == head)
                .and_then(|c| c.find_mut(rest)),
        }
    }

    /// Collapse the node at a name path
    pub fn collapse_at(&mut self, path: &[String]) -> TreeResult<()> {
        self.apply_at(path, TreeNode::collapse)
    }

    /// Expand the node at a name path
    pub fn expand_at(&mut self, path: &[String]) -> TreeResult<()> {
        self.apply_at(path, TreeNode::expand)
    }

    /// Toggle the node at a name path
    pub fn toggle_at(&mut self, path: &[String]) -> TreeResult<()> {
        self.apply_at(path, TreeNode::toggle)
    }

    fn apply_at(&mut self, path: &[String], op: impl FnOnce(&mut TreeNode)) -> TreeResult<()> {
        match self.find_mut(path) {
            Some(node) => {
                op(node);
                Ok(())
            }
            None => Err(TreeError::UnknownPath(path.to_vec())),
        }
    }

    /// Number of visible nodes in this subtree (collapsed subtrees count
    /// only their root)
    pub fn visible_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::visible_len).sum::<usize>()
    }

    /// Visible leaves in tree order
    pub fn visible_leaves(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        if self.children.is_empty() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_leaves(out);
            }
        }
    }

    /// Snapshot of the visible tree for serialization
    pub fn to_view(&self) -> TreeView {
        TreeView {
            name: self.name.clone(),
            kind: self.kind,
            doc_count: self.doc_count,
            doc: self.doc,
            collapsed: self.is_collapsed(),
            children: self.children.iter().map(TreeNode::to_view).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    /// root → (Politics → (Swaraj → doc), Economy)
    fn tree() -> TreeNode {
        let mut swaraj = TreeNode::new("Swaraj", TreeKind::Theme);
        swaraj.children.push(TreeNode::document("Hind Swaraj", DocId::new(1)));
        let mut politics = TreeNode::new("Politics", TreeKind::Category);
        politics.children.push(swaraj);
        let mut root = TreeNode::new("corpus", TreeKind::Root);
        root.children.push(politics);
        root.children.push(TreeNode::new("Economy", TreeKind::Category));
        root
    }

    #[test]
    fn test_collapse_parks_children() {
        let mut t = tree();
        assert_eq!(t.visible_len(), 5);

        t.toggle_at(&path(&["Politics"])).unwrap();
        assert_eq!(t.visible_len(), 3);
        assert!(t.find(&path(&["Politics"])).unwrap().is_collapsed());
        // the subtree is parked, not lost
        assert!(t.find(&path(&["Politics", "Swaraj", "Hind Swaraj"])).is_some());
    }

    #[test]
    fn test_collapse_expand_idempotent() {
        let mut t = tree();
        t.collapse();
        t.collapse();
        assert_eq!(t.visible_len(), 1);
        t.expand();
        t.expand();
        assert_eq!(t.visible_len(), 5);
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let mut t = tree();
        t.toggle_at(&path(&["Politics", "Swaraj", "Hind Swaraj"])).unwrap();
        assert_eq!(t.visible_len(), 5);
    }

    #[test]
    fn test_collapse_and_expand_at_path() {
        let mut t = tree();
        t.collapse_at(&path(&["Politics"])).unwrap();
        assert_eq!(t.visible_len(), 3);
        // collapsing again is a no-op
        t.collapse_at(&path(&["Politics"])).unwrap();
        assert_eq!(t.visible_len(), 3);

        t.expand_at(&path(&["Politics"])).unwrap();
        assert_eq!(t.visible_len(), 5);
    }

    #[test]
    fn test_unknown_path_errors() {
        let mut t = tree();
        let err = t.toggle_at(&path(&["Nowhere"])).unwrap_err();
        assert_eq!(err, TreeError::UnknownPath(vec!["Nowhere".to_string()]));
    }

    #[test]
    fn test_collapse_to_depth() {
        let mut t = tree();
        t.collapse_to_depth(1);
        // root and categories visible, themes parked
        assert_eq!(t.visible_len(), 3);
        assert!(t.find(&path(&["Politics"])).unwrap().is_collapsed());

        t.expand_all();
        assert_eq!(t.visible_len(), 5);
    }

    #[test]
    fn test_visible_leaves_in_tree_order() {
        let t = tree();
        let names: Vec<&str> = t.visible_leaves().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Hind Swaraj", "Economy"]);
    }
}
