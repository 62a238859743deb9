//! Diagnostic text drawings of a tree.
//!
//! Read-only: renderers only look at node keys and child slots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::error::DomainError;
use crate::domain::node::NodeId;
use crate::domain::tree::BalancedBst;

/// Marker shown by the termtree rendering for an absent sibling.
pub const ABSENT_CHILD: &str = "∅";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Sideways drawing: right subtree above, left subtree below
    #[default]
    Pretty,
    /// Top-down drawing via termtree, children listed left then right
    Termtree,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Pretty => write!(f, "pretty"),
            RenderStyle::Termtree => write!(f, "termtree"),
        }
    }
}

impl FromStr for RenderStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(RenderStyle::Pretty),
            "termtree" | "tree" => Ok(RenderStyle::Termtree),
            other => Err(DomainError::InvalidArgument(format!(
                "unknown render style: {other} (expected pretty or termtree)"
            ))),
        }
    }
}

/// Render `tree` in the requested style.
pub fn render(tree: &BalancedBst, style: RenderStyle) -> String {
    match style {
        RenderStyle::Pretty => render_pretty(tree),
        RenderStyle::Termtree => tree.to_tree_string().to_string(),
    }
}

/// Sideways drawing, one node per line.
///
/// ```text
/// │   ┌── 3
/// └── 2
///     └── 1
/// ```
///
/// An empty tree renders as an empty string.
pub fn render_pretty(tree: &BalancedBst) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        pretty_lines(tree, root, "", true, &mut out);
    }
    out
}

fn pretty_lines(tree: &BalancedBst, id: NodeId, prefix: &str, is_left: bool, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if let Some(right) = node.right {
        let child_prefix = format!("{prefix}{}", if is_left { "│   " } else { "    " });
        pretty_lines(tree, right, &child_prefix, false, out);
    }
    out.push_str(prefix);
    out.push_str(if is_left { "└── " } else { "┌── " });
    out.push_str(&node.key.to_string());
    out.push('\n');
    if let Some(left) = node.left {
        let child_prefix = format!("{prefix}{}", if is_left { "    " } else { "│   " });
        pretty_lines(tree, left, &child_prefix, true, out);
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for BalancedBst {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(bst: &BalancedBst, id: NodeId) -> Tree<String> {
            let Some(node) = bst.get(id) else {
                return Tree::new(ABSENT_CHILD.to_string());
            };
            let mut tree = Tree::new(node.key.to_string());
            if node.is_leaf() {
                return tree;
            }
            for child in [node.left, node.right] {
                match child {
                    Some(child_id) => tree.push(build_tree(bst, child_id)),
                    None => tree.push(Tree::new(ABSENT_CHILD.to_string())),
                };
            }
            tree
        }

        match self.root() {
            Some(root) => build_tree(self, root),
            None => Tree::new("(empty)".to_string()),
        }
    }
}
