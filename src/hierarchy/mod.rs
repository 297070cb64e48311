//! Collapsible category → subcategory → theme → document hierarchy

pub mod builder;
pub mod node;

pub use builder::{CategorySpec, HierarchyBuilder, SubcategorySpec, Taxonomy};
pub use node::{TreeError, TreeKind, TreeNode, TreeResult, TreeView};
