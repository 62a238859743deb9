//! Integration tests for the four traversal orders

use bstree::domain::{BalancedBst, DomainError, Key, Node, TraversalOrder};
use rstest::{fixture, rstest};

#[fixture]
fn example() -> BalancedBst {
    BalancedBst::new(vec![7, 3, 9, 1, 5, 8, 10])
}

fn visit(tree: &BalancedBst, order: TraversalOrder) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut visitor = |node: &Node| keys.push(node.key);
    tree.traverse(order, Some(&mut visitor)).expect("visitor supplied");
    keys
}

#[rstest]
#[case(TraversalOrder::Level, vec![7, 3, 9, 1, 5, 8, 10])]
#[case(TraversalOrder::In, vec![1, 3, 5, 7, 8, 9, 10])]
#[case(TraversalOrder::Pre, vec![7, 3, 1, 5, 9, 8, 10])]
#[case(TraversalOrder::Post, vec![1, 5, 3, 8, 10, 9, 7])]
fn given_example_tree_when_traversing_then_visits_in_defined_order(
    example: BalancedBst,
    #[case] order: TraversalOrder,
    #[case] expected: Vec<Key>,
) {
    assert_eq!(visit(&example, order), expected);
}

#[rstest]
fn given_each_order_when_visitor_missing_then_invalid_argument_and_no_visits(
    example: BalancedBst,
) {
    for order in TraversalOrder::ALL {
        let result = example.traverse(order, None);
        match result {
            Err(DomainError::InvalidArgument(msg)) => assert!(msg.contains("visitor")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}

#[rstest]
fn given_typed_visitor_methods_when_called_then_agree_with_traverse(example: BalancedBst) {
    let mut level = Vec::new();
    let mut pre = Vec::new();
    let mut post = Vec::new();
    let mut in_order = Vec::new();
    example.level_order(|n| level.push(n.key));
    example.pre_order(|n| pre.push(n.key));
    example.post_order(|n| post.push(n.key));
    example.in_order(|n| in_order.push(n.key));

    assert_eq!(level, visit(&example, TraversalOrder::Level));
    assert_eq!(pre, visit(&example, TraversalOrder::Pre));
    assert_eq!(post, visit(&example, TraversalOrder::Post));
    assert_eq!(in_order, visit(&example, TraversalOrder::In));
}

#[test]
fn given_empty_tree_when_traversing_then_zero_visits() {
    let tree = BalancedBst::empty();
    for order in TraversalOrder::ALL {
        assert!(visit(&tree, order).is_empty());
    }
}

#[test]
fn given_degenerate_chain_when_traversing_then_every_node_once() {
    let mut tree = BalancedBst::empty();
    for key in 0..2_000 {
        tree.insert(key);
    }
    for order in TraversalOrder::ALL {
        let keys = visit(&tree, order);
        assert_eq!(keys.len(), 2_000, "{order}");
    }
    assert_eq!(visit(&tree, TraversalOrder::Pre), (0..2_000).collect::<Vec<_>>());
    assert_eq!(
        visit(&tree, TraversalOrder::Post),
        (0..2_000).rev().collect::<Vec<_>>()
    );
}

#[test]
fn given_iterators_when_collecting_handles_then_handles_resolve_to_same_nodes() {
    let tree = BalancedBst::new(1..=10);
    for (id, node) in tree.iter_post_order() {
        assert_eq!(tree.get(id), Some(node));
        assert_eq!(tree.find(node.key), Some(id));
    }
}
