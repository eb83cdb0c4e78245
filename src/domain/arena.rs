use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Handle naming one node slot in a [`NodeArena`].
///
/// Handles stay valid until their node is removed. A handle outliving its
/// node is stale: every lookup through it yields `None`, even if the slot has
/// since been reused, because the arena tracks slot generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}.{}", slot, generation)
    }
}

/// Binary tree node stored in the arena.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Element held by this node
    pub value: T,
    /// Root of the subtree holding smaller elements
    pub left: Option<NodeId>,
    /// Root of the subtree holding greater elements
    pub right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Borrowed view of one node, handed to visitors and yielded by walkers.
pub struct NodeRef<'a, T> {
    id: NodeId,
    node: &'a Node<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(id: NodeId, node: &'a Node<T>) -> Self {
        Self { id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn left(&self) -> Option<NodeId> {
        self.node.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.node.right
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.node.value)
            .field("left", &self.node.left)
            .field("right", &self.node.right)
            .finish()
    }
}

/// Arena storage for all nodes of one tree.
///
/// The arena owns every node; links between nodes are [`NodeId`]s. The tree
/// on top of it is responsible for removing a node as soon as it is unlinked,
/// so the number of live slots always equals the number of reachable nodes.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    arena: Arena<Node<T>>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn insert_node(&mut self, value: T) -> NodeId {
        NodeId(self.arena.insert(Node::new(value)))
    }

    /// Frees the slot and hands back the node. Its children are not touched.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node<T>> {
        self.arena.remove(id.0)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id.0)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.arena.get_mut(id.0)
    }

    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.get_node(id).map(|node| NodeRef::new(id, node))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_removed_node_when_looking_up_then_handle_is_stale() {
        let mut arena = NodeArena::new();
        let first = arena.insert_node(1);
        assert_eq!(arena.get_node(first).map(|n| n.value), Some(1));

        let removed = arena.remove_node(first);
        assert_eq!(removed.map(|n| n.value), Some(1));
        assert!(arena.get_node(first).is_none());

        // the freed slot is reused under a new generation
        let second = arena.insert_node(2);
        assert_ne!(first, second);
        assert!(arena.node_ref(first).is_none());
        assert_eq!(arena.node_ref(second).map(|n| *n.value()), Some(2));
    }

    #[test]
    fn given_linked_nodes_when_viewing_then_node_ref_exposes_links() {
        let mut arena = NodeArena::new();
        let parent = arena.insert_node(10);
        let child = arena.insert_node(5);
        if let Some(node) = arena.get_node_mut(parent) {
            node.left = Some(child);
        }

        let view = arena.node_ref(parent).expect("parent is live");
        assert_eq!(view.left(), Some(child));
        assert_eq!(view.right(), None);
        assert!(!view.is_leaf());
        assert!(arena.node_ref(child).expect("child is live").is_leaf());
        assert_eq!(arena.len(), 2);
    }
}
