//! Stateless traversal algorithms over a [`NodeArena`].
//!
//! Every order is available in two forms: a lazy [`Walk`] (from which the
//! collecting entry points are built) and a visiting form that calls a
//! closure per node and returns nothing. The depth-first walkers keep an
//! explicit stack instead of recursing, so a tree degenerated into a list by
//! repeated inserts cannot exhaust the call stack.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::domain::arena::{NodeArena, NodeId, NodeRef};

/// Order in which a walk yields nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Breadth-first: top to bottom, left to right within a level
    LevelOrder,
    /// left, self, right (ascending for a search tree)
    InOrder,
    /// self, left, right
    PreOrder,
    /// left, right, self
    PostOrder,
}

impl Order {
    pub const ALL: [Order; 4] = [
        Order::LevelOrder,
        Order::PreOrder,
        Order::PostOrder,
        Order::InOrder,
    ];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::LevelOrder => "Level Order",
            Order::InOrder => "Inorder",
            Order::PreOrder => "Preorder",
            Order::PostOrder => "Postorder",
        };
        f.write_str(name)
    }
}

/// Pending work of a walk; the shape depends on the order.
#[derive(Debug, Clone)]
enum Frontier {
    Level(VecDeque<NodeId>),
    Pre(Vec<NodeId>),
    In {
        stack: Vec<NodeId>,
        cursor: Option<NodeId>,
    },
    /// `(node, children_expanded)`
    Post(Vec<(NodeId, bool)>),
}

/// Lazy traversal yielding a [`NodeRef`] per node.
///
/// Links naming a node that is no longer in the arena are skipped.
pub struct Walk<'a, T> {
    nodes: &'a NodeArena<T>,
    frontier: Frontier,
}

impl<'a, T> Walk<'a, T> {
    pub fn new(nodes: &'a NodeArena<T>, root: Option<NodeId>, order: Order) -> Self {
        let frontier = match order {
            Order::LevelOrder => Frontier::Level(root.into_iter().collect()),
            Order::PreOrder => Frontier::Pre(root.into_iter().collect()),
            Order::InOrder => Frontier::In {
                stack: Vec::new(),
                cursor: root,
            },
            Order::PostOrder => Frontier::Post(root.into_iter().map(|id| (id, false)).collect()),
        };
        Self { nodes, frontier }
    }

    /// Maps the walk onto the element values.
    pub fn values(self) -> impl Iterator<Item = &'a T> {
        self.map(|node| node.value())
    }
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        match &mut self.frontier {
            Frontier::Level(queue) => {
                while let Some(id) = queue.pop_front() {
                    if let Some(node) = nodes.get_node(id) {
                        queue.extend(node.left);
                        queue.extend(node.right);
                        return Some(NodeRef::new(id, node));
                    }
                }
                None
            }
            Frontier::Pre(stack) => {
                while let Some(id) = stack.pop() {
                    if let Some(node) = nodes.get_node(id) {
                        // right goes first so left is popped first
                        stack.extend(node.right);
                        stack.extend(node.left);
                        return Some(NodeRef::new(id, node));
                    }
                }
                None
            }
            Frontier::In { stack, cursor } => loop {
                while let Some(id) = cursor.take() {
                    if let Some(node) = nodes.get_node(id) {
                        stack.push(id);
                        *cursor = node.left;
                    }
                }
                let id = stack.pop()?;
                if let Some(node) = nodes.get_node(id) {
                    *cursor = node.right;
                    return Some(NodeRef::new(id, node));
                }
            },
            Frontier::Post(stack) => {
                while let Some((id, expanded)) = stack.pop() {
                    let Some(node) = nodes.get_node(id) else {
                        continue;
                    };
                    if expanded {
                        return Some(NodeRef::new(id, node));
                    }
                    stack.push((id, true));
                    stack.extend(node.right.map(|right| (right, false)));
                    stack.extend(node.left.map(|left| (left, false)));
                }
                None
            }
        }
    }
}

impl<T> FusedIterator for Walk<'_, T> {}

/// Walks the subtree under `root` in the given order.
pub fn walk<T>(nodes: &NodeArena<T>, root: Option<NodeId>, order: Order) -> Walk<'_, T> {
    Walk::new(nodes, root, order)
}

/// Collects the values under `root` in the given order.
pub fn collect<T>(nodes: &NodeArena<T>, root: Option<NodeId>, order: Order) -> Vec<&T> {
    walk(nodes, root, order).values().collect()
}

/// Calls `visitor` once per node under `root`, in the given order.
pub fn visit<'a, T, F>(nodes: &'a NodeArena<T>, root: Option<NodeId>, order: Order, visitor: F)
where
    F: FnMut(NodeRef<'a, T>),
{
    walk(nodes, root, order).for_each(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;

    //        4
    //      /   \
    //     2     6
    //    / \     \
    //   1   3     7
    fn sample() -> (NodeArena<i32>, NodeId) {
        let mut nodes = NodeArena::new();
        let ids: Vec<NodeId> = [4, 2, 6, 1, 3, 7]
            .into_iter()
            .map(|v| nodes.insert_node(v))
            .collect();
        let link = |nodes: &mut NodeArena<i32>, parent: usize, left: Option<usize>, right: Option<usize>| {
            let node = nodes.get_node_mut(ids[parent]).expect("live node");
            node.left = left.map(|i| ids[i]);
            node.right = right.map(|i| ids[i]);
        };
        link(&mut nodes, 0, Some(1), Some(2));
        link(&mut nodes, 1, Some(3), Some(4));
        link(&mut nodes, 2, None, Some(5));
        (nodes, ids[0])
    }

    #[test]
    fn given_sample_tree_when_walking_each_order_then_yields_expected_sequence() {
        let (nodes, root) = sample();
        let values = |order| -> Vec<i32> { collect(&nodes, Some(root), order).into_iter().copied().collect() };

        assert_eq!(values(Order::LevelOrder), vec![4, 2, 6, 1, 3, 7]);
        assert_eq!(values(Order::InOrder), vec![1, 2, 3, 4, 6, 7]);
        assert_eq!(values(Order::PreOrder), vec![4, 2, 1, 3, 6, 7]);
        assert_eq!(values(Order::PostOrder), vec![1, 3, 2, 7, 6, 4]);
    }

    #[test]
    fn given_absent_root_when_walking_then_yields_nothing() {
        let nodes: NodeArena<i32> = NodeArena::new();
        for order in Order::ALL {
            assert!(collect(&nodes, None, order).is_empty());
            let mut calls = 0;
            visit(&nodes, None, order, |_| calls += 1);
            assert_eq!(calls, 0);
        }
    }

    #[test]
    fn given_visitor_when_visiting_then_sees_every_node_once_in_order() {
        let (nodes, root) = sample();
        let mut seen = Vec::new();
        visit(&nodes, Some(root), Order::PostOrder, |node| {
            seen.push((*node.value(), node.is_leaf()));
        });
        assert_eq!(
            seen,
            vec![(1, true), (3, true), (2, false), (7, true), (6, false), (4, false)]
        );
    }

    #[test]
    fn given_exhausted_walk_when_polled_again_then_stays_exhausted() {
        let (nodes, root) = sample();
        let mut walk = walk(&nodes, Some(root), Order::InOrder);
        assert_eq!(walk.by_ref().count(), 6);
        assert!(walk.next().is_none());
    }

    #[test]
    fn given_order_when_displayed_then_uses_report_label() {
        assert_eq!(Order::LevelOrder.to_string(), "Level Order");
        assert_eq!(Order::PostOrder.to_string(), "Postorder");
    }
}
