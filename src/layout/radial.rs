//! Radial layout for the hierarchy view
//!
//! Visible leaves get evenly spaced angles over the full circle in tree
//! order; an internal node sits at the mean angle of its children, one
//! ring further in. Collapsed subtrees are invisible to the layout.

use crate::hierarchy::{TreeKind, TreeNode};
use serde::Serialize;
use std::f64::consts::TAU;

/// Position of one visible tree node on the radial plane
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialPlacement {
    /// Name path from (and excluding) the root
    pub path: Vec<String>,
    pub kind: TreeKind,
    pub depth: usize,
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

/// Radial layout parameters
#[derive(Debug, Clone, Copy)]
pub struct RadialLayout {
    pub ring_spacing: f64,
    pub center: (f64, f64),
}

impl RadialLayout {
    pub fn new(ring_spacing: f64) -> Self {
        RadialLayout {
            ring_spacing,
            center: (0.0, 0.0),
        }
    }

    pub fn with_center(mut self, cx: f64, cy: f64) -> Self {
        self.center = (cx, cy);
        self
    }

    /// Place every visible node of the tree
    pub fn place(&self, root: &TreeNode) -> Vec<RadialPlacement> {
        let leaves = root.visible_leaves().len();
        let step = if leaves > 0 { TAU / leaves as f64 } else { 0.0 };

        let mut out = Vec::new();
        let mut next_leaf = 0usize;
        self.walk(root, &mut Vec::new(), 0, step, &mut next_leaf, &mut out);
        out
    }

    /// Post-order walk: children first, parent at their mean angle
    fn walk(
        &self,
        node: &TreeNode,
        path: &mut Vec<String>,
        depth: usize,
        step: f64,
        next_leaf: &mut usize,
        out: &mut Vec<RadialPlacement>,
    ) -> f64 {
        let angle = if node.children.is_empty() {
            let angle = *next_leaf as f64 * step;
            *next_leaf += 1;
            angle
        } else {
            let mut sum = 0.0;
            for child in &node.children {
                path.push(child.name.clone());
                sum += self.walk(child, path, depth + 1, step, next_leaf, out);
                path.pop();
            }
            sum / node.children.len() as f64
        };

        let radius = depth as f64 * self.ring_spacing;
        let (x, y) = self.to_cartesian(angle, radius);
        out.push(RadialPlacement {
            path: path.clone(),
            kind: node.kind,
            depth,
            angle,
            radius,
            x,
            y,
        });
        angle
    }

    /// Polar to cartesian around the configured center
    pub fn to_cartesian(&self, angle: f64, radius: f64) -> (f64, f64) {
        (
            self.center.0 + radius * angle.cos(),
            self.center.1 + radius * angle.sin(),
        )
    }
}
