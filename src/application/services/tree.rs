//! Tree service
//!
//! Builds a tree from user-supplied keys and applies a batch of mutations.
//! There is no persisted state: every request starts from its input keys.

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{BalancedBst, Key, Node, TraversalOrder};

/// A construction followed by mutations, applied in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    pub keys: Vec<Key>,
    pub insert: Vec<Key>,
    pub delete: Vec<Key>,
    pub rebalance: bool,
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub tree: BalancedBst,
    pub height: i32,
    pub balanced: bool,
}

/// Where a key sits in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub key: Key,
    pub found: bool,
    pub depth: i32,
    pub height: i32,
}

#[derive(Debug, Default)]
pub struct TreeService;

impl TreeService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, request: &BuildRequest) -> BuildOutcome {
        let mut tree = BalancedBst::new(request.keys.iter().copied());
        for &key in &request.insert {
            tree.insert(key);
        }
        for &key in &request.delete {
            tree.delete_item(key);
        }
        if request.rebalance {
            tree.rebalance();
        }
        let height = tree.height(tree.root());
        let balanced = tree.is_balanced();
        debug!(len = tree.len(), height, balanced, "build finished");
        BuildOutcome {
            tree,
            height,
            balanced,
        }
    }

    /// Keys of a freshly built tree in visit order.
    #[instrument(level = "debug", skip(self))]
    pub fn traverse(&self, keys: &[Key], order: TraversalOrder) -> ApplicationResult<Vec<Key>> {
        let tree = BalancedBst::new(keys.iter().copied());
        let mut visited = Vec::with_capacity(tree.len());
        let mut visit = |node: &Node| visited.push(node.key);
        tree.traverse(order, Some(&mut visit))?;
        Ok(visited)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn locate(&self, keys: &[Key], key: Key) -> Location {
        let tree = BalancedBst::new(keys.iter().copied());
        match tree.find(key) {
            Some(id) => Location {
                key,
                found: true,
                depth: tree.depth(id),
                height: tree.height(Some(id)),
            },
            None => Location {
                key,
                found: false,
                depth: -1,
                height: -1,
            },
        }
    }
}
