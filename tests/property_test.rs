//! Property tests for search-tree ordering and rebuild invariants

use std::collections::BTreeSet;

use proptest::prelude::*;

use bstree::util::testing;
use bstree::{BalancedTree, Order};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn owned(values: Vec<&i32>) -> Vec<i32> {
    values.into_iter().copied().collect()
}

/// Smallest height a tree with `n` nodes can have.
fn minimal_height(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

proptest! {
    #[test]
    fn prop_build_gives_sorted_distinct_balanced(xs in proptest::collection::vec(any::<i32>(), 0..256)) {
        let tree = BalancedTree::new(xs.clone());
        let distinct: Vec<i32> = xs.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        prop_assert_eq!(owned(tree.inorder()), distinct.clone());
        prop_assert_eq!(tree.level_order().len(), distinct.len());
        if distinct.is_empty() {
            prop_assert_eq!(tree.balanced(), None);
        } else {
            prop_assert_eq!(tree.balanced(), Some(true));
            prop_assert_eq!(tree.height(), Some(minimal_height(distinct.len())));
        }
    }

    #[test]
    fn prop_find_matches_membership(
        xs in proptest::collection::vec(-500i32..500, 0..128),
        probes in proptest::collection::vec(-600i32..600, 0..64),
    ) {
        let tree = BalancedTree::new(xs.clone());
        for probe in probes {
            let found = tree.find(&probe);
            prop_assert_eq!(found.is_some(), xs.contains(&probe));
            if let Some(id) = found {
                prop_assert_eq!(tree.get(id), Some(&probe));
            }
        }
    }

    #[test]
    fn prop_delete_keeps_order_and_removes_value(
        xs in proptest::collection::vec(-200i32..200, 1..128),
        deletes in proptest::collection::vec(-250i32..250, 0..64),
    ) {
        let mut tree = BalancedTree::new(xs.clone());
        let mut expected: BTreeSet<i32> = xs.into_iter().collect();

        for value in deletes {
            prop_assert_eq!(tree.delete(&value), expected.remove(&value));
            let values = owned(tree.inorder());
            prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(tree.find(&value).is_none());
        }
        prop_assert_eq!(owned(tree.inorder()), expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_inserts_keep_inorder_non_decreasing(
        xs in proptest::collection::vec(-100i32..100, 0..64),
        inserts in proptest::collection::vec(-100i32..100, 0..64),
    ) {
        let mut tree = BalancedTree::new(xs);
        for value in inserts.iter().copied() {
            tree.insert(value);
            prop_assert!(tree.contains(&value));
        }
        let values = owned(tree.inorder());
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_rebalance_preserves_multiset_and_restores_balance(
        xs in proptest::collection::vec(any::<i32>(), 0..64),
        inserts in proptest::collection::vec(any::<i32>(), 0..128),
    ) {
        let mut tree = BalancedTree::new(xs);
        for value in inserts {
            tree.insert(value);
        }
        let before = owned(tree.inorder());

        tree.rebalance();
        prop_assert_eq!(owned(tree.inorder()), before.clone());
        prop_assert_eq!(tree.len(), before.len());
        if before.is_empty() {
            prop_assert_eq!(tree.balanced(), None);
        } else {
            prop_assert_eq!(tree.balanced(), Some(true));
            prop_assert_eq!(tree.height(), Some(minimal_height(before.len())));
        }
    }

    #[test]
    fn prop_every_order_visits_each_node_once(xs in proptest::collection::vec(any::<i32>(), 0..128)) {
        let tree = BalancedTree::new(xs);
        let mut sorted_inorder = owned(tree.inorder());
        sorted_inorder.sort();
        for order in Order::ALL {
            let mut seen = owned(tree.values(order).collect());
            seen.sort();
            prop_assert_eq!(&seen, &sorted_inorder);
        }
    }
}
