//! Traversals over a [`BalancedBst`].
//!
//! All four orders are available as pull-based iterators over `(NodeId, &Node)`
//! and as visitor methods. Iterators keep an explicit stack or queue, so a
//! degenerate chain of any length cannot exhaust the call stack.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId};
use crate::domain::tree::BalancedBst;

/// Order in which a traversal visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Breadth-first, left to right
    Level,
    /// Left, node, right
    In,
    /// Node, left, right
    Pre,
    /// Left, right, node
    Post,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::Level,
        TraversalOrder::Pre,
        TraversalOrder::Post,
        TraversalOrder::In,
    ];
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Level => "level",
            TraversalOrder::In => "in",
            TraversalOrder::Pre => "pre",
            TraversalOrder::Post => "post",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TraversalOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "level" | "level-order" | "bfs" => Ok(TraversalOrder::Level),
            "in" | "in-order" | "inorder" => Ok(TraversalOrder::In),
            "pre" | "pre-order" | "preorder" => Ok(TraversalOrder::Pre),
            "post" | "post-order" | "postorder" => Ok(TraversalOrder::Post),
            other => Err(DomainError::InvalidArgument(format!(
                "unknown traversal order: {other} (expected level, in, pre or post)"
            ))),
        }
    }
}

impl BalancedBst {
    pub fn iter_level_order(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    pub fn iter_in_order(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    pub fn iter_pre_order(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_post_order(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Iterator for a traversal order chosen at runtime.
    pub fn iter_order(
        &self,
        order: TraversalOrder,
    ) -> Box<dyn Iterator<Item = (NodeId, &Node)> + '_> {
        match order {
            TraversalOrder::Level => Box::new(self.iter_level_order()),
            TraversalOrder::In => Box::new(self.iter_in_order()),
            TraversalOrder::Pre => Box::new(self.iter_pre_order()),
            TraversalOrder::Post => Box::new(self.iter_post_order()),
        }
    }

    pub fn level_order<F: FnMut(&Node)>(&self, mut visitor: F) {
        self.iter_level_order().for_each(|(_, node)| visitor(node));
    }

    pub fn in_order<F: FnMut(&Node)>(&self, mut visitor: F) {
        self.iter_in_order().for_each(|(_, node)| visitor(node));
    }

    pub fn pre_order<F: FnMut(&Node)>(&self, mut visitor: F) {
        self.iter_pre_order().for_each(|(_, node)| visitor(node));
    }

    pub fn post_order<F: FnMut(&Node)>(&self, mut visitor: F) {
        self.iter_post_order().for_each(|(_, node)| visitor(node));
    }

    /// Visit every node in `order`.
    ///
    /// Fails with [`DomainError::InvalidArgument`] before visiting anything
    /// when no visitor is supplied.
    #[instrument(level = "debug", skip(self, visitor))]
    pub fn traverse(
        &self,
        order: TraversalOrder,
        visitor: Option<&mut dyn FnMut(&Node)>,
    ) -> DomainResult<()> {
        let visitor = visitor.ok_or_else(|| {
            DomainError::InvalidArgument(format!("{order}-order traversal requires a visitor"))
        })?;
        match order {
            TraversalOrder::Level => self.level_order(visitor),
            TraversalOrder::In => self.in_order(visitor),
            TraversalOrder::Pre => self.pre_order(visitor),
            TraversalOrder::Post => self.post_order(visitor),
        }
        Ok(())
    }
}

/// Breadth-first iterator seeded with the root.
pub struct LevelOrderIterator<'a> {
    tree: &'a BalancedBst,
    queue: VecDeque<NodeId>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a BalancedBst) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = tree.root() {
            queue.push_back(root);
        }
        Self { tree, queue }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = self.tree.get(id)?;
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some((id, node))
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a BalancedBst,
    stack: Vec<NodeId>,
    // next subtree whose left spine still has to be pushed
    pending: Option<NodeId>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a BalancedBst) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            pending: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.pending {
            self.stack.push(id);
            self.pending = self.tree.get(id).and_then(|n| n.left);
        }
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;
        self.pending = node.right;
        Some((id, node))
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a BalancedBst,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a BalancedBst) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;
        // right first so the left subtree is popped first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((id, node))
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a BalancedBst,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BalancedBst) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, visited)) = self.stack.pop() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            if visited {
                return Some((id, node));
            }
            self.stack.push((id, true));
            if let Some(right) = node.right {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left {
                self.stack.push((left, false));
            }
        }
        None
    }
}
