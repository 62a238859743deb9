use std::fmt;

use generational_arena::Index;

/// Key type stored in the tree.
pub type Key = i64;

/// Read-only handle to a node stored in a [`BalancedBst`](crate::domain::BalancedBst).
///
/// Handles stay valid until the node they point to is removed from the tree.
/// A removed node's handle never resolves to another node.
pub type NodeId = Index;

/// Tree node in the arena-based binary search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Key held by this node
    pub key: Key,
    /// Index of the left child in the arena, None if absent
    pub left: Option<NodeId>,
    /// Index of the right child in the arena, None if absent
    pub right: Option<NodeId>,
}

impl Node {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
