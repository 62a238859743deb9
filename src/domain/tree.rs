//! Arena-backed binary search tree with explicit rebalancing.
//!
//! The tree is built height-balanced from a sorted key set. `insert` and
//! `delete_item` keep the BST property but never restore balance on their own;
//! callers check with `is_balanced` and restore with `rebalance`.

use std::cmp::Ordering;

use generational_arena::Arena;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::node::{Key, Node, NodeId};

/// Deduplicate and sort keys ascending.
pub fn sorted_unique<I>(values: I) -> Vec<Key>
where
    I: IntoIterator<Item = Key>,
{
    values.into_iter().sorted_unstable().dedup().collect()
}

/// Binary search tree over unique integer keys.
///
/// Nodes live in a generational arena; each node owns its two child slots by
/// index and there are no parent links. Removing a node frees its slot, so any
/// handle to it stops resolving.
#[derive(Debug, Clone)]
pub struct BalancedBst {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
}

impl Default for BalancedBst {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Key> for BalancedBst {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Key>> for BalancedBst {
    fn from(values: Vec<Key>) -> Self {
        Self::new(values)
    }
}

impl BalancedBst {
    pub fn empty() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build a balanced tree from arbitrary input.
    ///
    /// Duplicates are discarded and the remaining keys sorted before the
    /// midpoint build, so the shape depends only on the number of unique keys.
    #[instrument(level = "debug", skip(values))]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        let keys = sorted_unique(values);
        let mut tree = Self::empty();
        tree.root = tree.build_tree(&keys);
        debug!(len = keys.len(), "built tree");
        tree
    }

    /// Midpoint build: the floor-middle key becomes the subtree root.
    fn build_tree(&mut self, keys: &[Key]) -> Option<NodeId> {
        if keys.is_empty() {
            return None;
        }
        let mid = keys.len() / 2;
        let id = self.arena.insert(Node::new(keys[mid]));
        let left = self.build_tree(&keys[..mid]);
        let right = self.build_tree(&keys[mid + 1..]);

        let node = &mut self.arena[id];
        node.left = left;
        node.right = right;
        Some(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a handle. Handles to removed nodes resolve to `None`.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<Key> {
        self.iter_in_order().map(|(_, node)| node.key).collect()
    }

    /// Insert `key`. A key that is already present leaves the tree unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, key: Key) {
        let root = self.insert_at(self.root, key);
        self.root = Some(root);
    }

    /// Returns the (possibly new) subtree root so the parent can relink it.
    fn insert_at(&mut self, node: Option<NodeId>, key: Key) -> NodeId {
        let Some(id) = node else {
            return self.arena.insert(Node::new(key));
        };
        let current = &self.arena[id];
        match key.cmp(&current.key) {
            Ordering::Equal => debug!(key, "duplicate key ignored"),
            Ordering::Less => {
                let left = current.left;
                let new_left = self.insert_at(left, key);
                self.arena[id].left = Some(new_left);
            }
            Ordering::Greater => {
                let right = current.right;
                let new_right = self.insert_at(right, key);
                self.arena[id].right = Some(new_right);
            }
        }
        id
    }

    /// Delete `key`. An absent key leaves the tree unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_item(&mut self, key: Key) {
        self.root = self.delete_at(self.root, key);
    }

    fn delete_at(&mut self, node: Option<NodeId>, key: Key) -> Option<NodeId> {
        let Some(id) = node else {
            debug!(key, "key not present");
            return None;
        };
        let Node {
            key: current,
            left,
            right,
        } = self.arena[id].clone();

        match key.cmp(&current) {
            Ordering::Less => {
                let new_left = self.delete_at(left, key);
                self.arena[id].left = new_left;
                Some(id)
            }
            Ordering::Greater => {
                let new_right = self.delete_at(right, key);
                self.arena[id].right = new_right;
                Some(id)
            }
            Ordering::Equal => match (left, right) {
                (None, _) => {
                    self.arena.remove(id);
                    right
                }
                (Some(left), None) => {
                    self.arena.remove(id);
                    Some(left)
                }
                (Some(_), Some(right)) => {
                    // copy the in-order successor's key up, then drop the successor
                    let successor = self.min_key(right);
                    self.arena[id].key = successor;
                    let new_right = self.delete_at(Some(right), successor);
                    self.arena[id].right = new_right;
                    Some(id)
                }
            },
        }
    }

    fn min_key(&self, mut id: NodeId) -> Key {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        self.arena[id].key
    }

    /// Handle of the node holding `key`, or `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, key: Key) -> Option<NodeId> {
        self.find_at(self.root, key)
    }

    fn find_at(&self, node: Option<NodeId>, key: Key) -> Option<NodeId> {
        let id = node?;
        let current = self.arena.get(id)?;
        match key.cmp(&current.key) {
            Ordering::Equal => Some(id),
            Ordering::Less => self.find_at(current.left, key),
            Ordering::Greater => self.find_at(current.right, key),
        }
    }

    /// Height of a subtree: -1 for an absent node, 0 for a leaf.
    ///
    /// Recomputed on every call.
    pub fn height(&self, node: Option<NodeId>) -> i32 {
        match node.and_then(|id| self.arena.get(id)) {
            None => -1,
            Some(n) => 1 + self.height(n.left).max(self.height(n.right)),
        }
    }

    /// Number of edges from the root to `node`.
    ///
    /// The walk is guided by comparing the handle's current key against each
    /// node on the way down and stops on handle identity. Returns -1 for an
    /// empty tree, a stale handle, or a handle the walk never reaches.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, node: NodeId) -> i32 {
        let Some(mut current) = self.root else {
            return -1;
        };
        let Some(target) = self.arena.get(node) else {
            debug!(?node, "stale handle");
            return -1;
        };

        let mut depth = 0;
        while current != node {
            let visited = &self.arena[current];
            let next = if target.key < visited.key {
                visited.left
            } else {
                visited.right
            };
            match next {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => return -1,
            }
        }
        depth
    }

    /// Every node's subtree heights differ by at most one.
    #[instrument(level = "debug", skip(self))]
    pub fn is_balanced(&self) -> bool {
        self.is_balanced_at(self.root)
    }

    fn is_balanced_at(&self, node: Option<NodeId>) -> bool {
        let Some(n) = node.and_then(|id| self.arena.get(id)) else {
            return true;
        };
        (self.height(n.left) - self.height(n.right)).abs() <= 1
            && self.is_balanced_at(n.left)
            && self.is_balanced_at(n.right)
    }

    /// Remove every node one by one so that no old handle can resolve to a
    /// node allocated afterwards.
    fn clear(&mut self) {
        let ids: Vec<NodeId> = self.arena.iter().map(|(id, _)| id).collect();
        for id in ids {
            self.arena.remove(id);
        }
        self.root = None;
    }

    /// Discard the current shape and rebuild minimum-height from the key set.
    ///
    /// Every handle obtained before the call goes stale.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) {
        let keys = sorted_unique(self.keys());
        debug!(len = keys.len(), height = self.height(self.root), "rebalancing");
        self.clear();
        self.root = self.build_tree(&keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(tree: &BalancedBst, id: Option<NodeId>) -> Option<Key> {
        id.and_then(|id| tree.get(id)).map(|n| n.key)
    }

    #[test]
    fn given_empty_input_when_building_then_has_no_root() {
        let tree = BalancedBst::new(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(tree.root()), -1);
        assert!(tree.is_balanced());
    }

    #[test]
    fn given_seven_keys_when_building_then_midpoints_become_roots() {
        let tree = BalancedBst::new(vec![7, 3, 9, 1, 5, 8, 10]);
        let root = tree.get(tree.root().unwrap()).unwrap();
        assert_eq!(root.key, 7);
        assert_eq!(key_of(&tree, root.left), Some(3));
        assert_eq!(key_of(&tree, root.right), Some(9));
        assert_eq!(tree.height(tree.root()), 2);
    }

    #[test]
    fn given_even_length_when_building_then_floor_midpoint_is_root() {
        // [1, 2, 3, 4] -> mid index 2
        let tree = BalancedBst::new(vec![4, 3, 2, 1]);
        assert_eq!(key_of(&tree, tree.root()), Some(3));
        let root = tree.get(tree.root().unwrap()).unwrap();
        assert_eq!(key_of(&tree, root.left), Some(2));
        assert_eq!(key_of(&tree, root.right), Some(4));
    }

    #[test]
    fn given_duplicate_when_inserting_then_arena_unchanged() {
        let mut tree = BalancedBst::new(vec![1, 2, 3]);
        tree.insert(2);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.keys(), vec![1, 2, 3]);
    }

    #[test]
    fn given_two_children_when_deleting_then_successor_key_moves_up() {
        let mut tree = BalancedBst::new(vec![1, 3, 5, 7, 8, 9, 10]);
        let root = tree.root();
        tree.delete_item(7);
        // same node, successor key
        assert_eq!(tree.root(), root);
        assert_eq!(key_of(&tree, tree.root()), Some(8));
        assert_eq!(tree.keys(), vec![1, 3, 5, 8, 9, 10]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn given_only_left_child_when_deleting_then_left_child_replaces_node() {
        let mut tree = BalancedBst::new(vec![5]);
        tree.insert(3);
        tree.delete_item(5);
        assert_eq!(key_of(&tree, tree.root()), Some(3));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_last_key_when_deleting_then_tree_is_empty() {
        let mut tree = BalancedBst::new(vec![5]);
        tree.delete_item(5);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn given_removed_node_when_resolving_handle_then_stale() {
        let mut tree = BalancedBst::new(vec![1, 2, 3]);
        let handle = tree.find(3).unwrap();
        tree.delete_item(3);
        assert!(tree.get(handle).is_none());
        assert_eq!(tree.depth(handle), -1);
        assert_eq!(tree.height(Some(handle)), -1);
    }

    #[test]
    fn given_leaf_handle_when_depth_then_counts_edges() {
        let tree = BalancedBst::new(vec![1, 3, 5, 7, 8, 9, 10]);
        assert_eq!(tree.depth(tree.root().unwrap()), 0);
        assert_eq!(tree.depth(tree.find(3).unwrap()), 1);
        assert_eq!(tree.depth(tree.find(10).unwrap()), 2);
    }

    #[test]
    fn given_handle_before_rebalance_when_resolving_after_then_stale() {
        let mut tree = BalancedBst::new(vec![1, 2, 3]);
        let handle = tree.find(2).unwrap();
        tree.rebalance();
        assert!(tree.get(handle).is_none());
        assert_eq!(tree.depth(handle), -1);
        assert!(tree.find(2).is_some());
    }

    #[test]
    fn given_skewed_chain_when_rebalancing_then_minimum_height() {
        let mut tree = BalancedBst::empty();
        for key in 0..15 {
            tree.insert(key);
        }
        assert_eq!(tree.height(tree.root()), 14);
        assert!(!tree.is_balanced());

        tree.rebalance();
        assert_eq!(tree.height(tree.root()), 3);
        assert!(tree.is_balanced());
        assert_eq!(tree.len(), 15);
    }
}
