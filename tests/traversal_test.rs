//! Tests for the four traversal orders in collect and visit form

use bstree::util::testing;
use bstree::{BalancedTree, Order};
use rstest::rstest;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

//          4
//        /   \
//       2     6
//      / \   / \
//     1   3 5   7
fn full_tree() -> BalancedTree<i64> {
    BalancedTree::new(1..=7)
}

#[rstest]
#[case(Order::LevelOrder, vec![4, 2, 6, 1, 3, 5, 7])]
#[case(Order::InOrder, vec![1, 2, 3, 4, 5, 6, 7])]
#[case(Order::PreOrder, vec![4, 2, 1, 3, 6, 5, 7])]
#[case(Order::PostOrder, vec![1, 3, 2, 5, 7, 6, 4])]
fn given_full_tree_when_walking_then_values_follow_order(#[case] order: Order, #[case] expected: Vec<i64>) {
    let tree = full_tree();
    let walked: Vec<i64> = tree.values(order).copied().collect();
    assert_eq!(walked, expected);

    let mut visited = Vec::new();
    tree.visit(order, |node| visited.push(*node.value()));
    assert_eq!(visited, expected);
}

#[test]
fn given_full_tree_when_collecting_then_named_entry_points_match_walks() {
    let tree = full_tree();
    assert_eq!(tree.level_order(), tree.values(Order::LevelOrder).collect::<Vec<_>>());
    assert_eq!(tree.inorder(), tree.values(Order::InOrder).collect::<Vec<_>>());
    assert_eq!(tree.preorder(), tree.values(Order::PreOrder).collect::<Vec<_>>());
    assert_eq!(tree.postorder(), tree.values(Order::PostOrder).collect::<Vec<_>>());
}

#[test]
fn given_visitor_when_visiting_each_order_then_sees_even_values() {
    let tree = full_tree();
    let cases = [
        (Order::LevelOrder, vec![4, 2, 6]),
        (Order::PreOrder, vec![4, 2, 6]),
        (Order::InOrder, vec![2, 4, 6]),
        (Order::PostOrder, vec![2, 6, 4]),
    ];

    for (order, expected) in cases {
        let mut found = Vec::new();
        let collect_even = |value: i64, found: &mut Vec<i64>| {
            if value % 2 == 0 {
                found.push(value)
            }
        };
        match order {
            Order::LevelOrder => tree.visit_level_order(|n| collect_even(*n.value(), &mut found)),
            Order::PreOrder => tree.visit_preorder(|n| collect_even(*n.value(), &mut found)),
            Order::InOrder => tree.visit_inorder(|n| collect_even(*n.value(), &mut found)),
            Order::PostOrder => tree.visit_postorder(|n| collect_even(*n.value(), &mut found)),
        }
        assert_eq!(found, expected, "{}", order);
    }
}

#[test]
fn given_empty_tree_when_traversing_then_nothing_collected_or_visited() {
    let tree: BalancedTree<i64> = BalancedTree::default();
    for order in Order::ALL {
        assert_eq!(tree.values(order).count(), 0);
        let mut calls = 0;
        tree.visit(order, |_| calls += 1);
        assert_eq!(calls, 0);
    }
    assert!(tree.level_order().is_empty());
    assert!(tree.postorder().is_empty());
}

#[test]
fn given_walk_when_inspecting_nodes_then_handles_resolve_to_values() {
    let tree = full_tree();
    for node in tree.walk(Order::PreOrder) {
        assert_eq!(tree.get(node.id()), Some(node.value()));
        assert_eq!(node.is_leaf(), node.value() % 2 == 1);
        if let Some(left) = node.left() {
            assert!(tree.get(left).expect("live child") < node.value());
        }
        if let Some(right) = node.right() {
            assert!(tree.get(right).expect("live child") > node.value());
        }
    }
}

#[test]
fn given_degenerate_chain_when_walking_depth_first_then_no_stack_overflow() {
    let mut tree = BalancedTree::default();
    for value in 0..5_000 {
        tree.insert(value);
    }
    assert_eq!(tree.values(Order::InOrder).count(), 5_000);
    assert_eq!(tree.values(Order::PostOrder).next(), Some(&4_999));
    assert_eq!(tree.values(Order::PreOrder).last(), Some(&4_999));
    assert_eq!(tree.height(), Some(5_000));
}
