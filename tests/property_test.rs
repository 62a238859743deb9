//! Property tests for the tree invariants

use std::collections::BTreeSet;

use bstree::domain::{BalancedBst, Key, TraversalOrder};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(Key),
    Delete(Key),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50i64..50).prop_map(Op::Insert),
        (-50i64..50).prop_map(Op::Delete),
    ]
}

fn floor_log2(n: usize) -> i32 {
    (usize::BITS - 1 - n.leading_zeros()) as i32
}

proptest! {
    #[test]
    fn construction_yields_sorted_unique_input(values in prop::collection::vec(-1_000i64..1_000, 0..200)) {
        let tree = BalancedBst::new(values.clone());
        let expected: Vec<Key> = values.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(tree.keys(), expected);
    }

    #[test]
    fn construction_is_balanced_with_floor_log2_height(values in prop::collection::vec(any::<i64>(), 1..300)) {
        let tree = BalancedBst::new(values);
        prop_assert!(tree.is_balanced());
        prop_assert_eq!(tree.height(tree.root()), floor_log2(tree.len()));
    }

    #[test]
    fn mutations_preserve_bst_invariant(
        initial in prop::collection::vec(-50i64..50, 0..40),
        ops in prop::collection::vec(op(), 0..80),
    ) {
        let mut tree = BalancedBst::new(initial.clone());
        let mut model: BTreeSet<Key> = initial.into_iter().collect();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    tree.insert(key);
                    model.insert(key);
                }
                Op::Delete(key) => {
                    tree.delete_item(key);
                    model.remove(&key);
                }
            }
            let keys = tree.keys();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(keys, model.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(tree.len(), model.len());
        }

        for key in -50i64..50 {
            prop_assert_eq!(tree.find(key).is_some(), model.contains(&key));
        }
    }

    #[test]
    fn every_traversal_visits_each_node_once(
        initial in prop::collection::vec(-100i64..100, 0..60),
        extra in prop::collection::vec(-100i64..100, 0..30),
    ) {
        let mut tree = BalancedBst::new(initial);
        for key in extra {
            tree.insert(key);
        }
        for order in TraversalOrder::ALL {
            let mut seen: Vec<Key> = tree.iter_order(order).map(|(_, n)| n.key).collect();
            prop_assert_eq!(seen.len(), tree.len());
            seen.sort_unstable();
            prop_assert_eq!(seen, tree.keys());
        }
    }

    #[test]
    fn rebalance_is_idempotent_and_balanced(
        initial in prop::collection::vec(-100i64..100, 0..60),
        extra in prop::collection::vec(0i64..500, 0..60),
    ) {
        let mut tree = BalancedBst::new(initial);
        for key in extra {
            tree.insert(key);
        }
        let keys = tree.keys();

        tree.rebalance();
        let once: Vec<Key> = tree.iter_pre_order().map(|(_, n)| n.key).collect();
        prop_assert!(tree.is_balanced());
        prop_assert_eq!(tree.keys(), keys);

        tree.rebalance();
        let twice: Vec<Key> = tree.iter_pre_order().map(|(_, n)| n.key).collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn depth_of_found_node_matches_comparison_path(values in prop::collection::vec(-100i64..100, 1..80)) {
        let tree = BalancedBst::new(values.clone());
        for key in values {
            let id = tree.find(key).unwrap();
            let depth = tree.depth(id);
            prop_assert!(depth >= 0);
            prop_assert!(depth <= tree.height(tree.root()));
        }
    }
}
