//! Binary search tree balanced by rebuilding.
//!
//! The tree starts out height-balanced (it is built from the sorted, deduplicated
//! input) and stays a plain BST under `insert`/`delete`. `rebalance` restores
//! minimal height by rebuilding from the inorder sequence.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::mem;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeArena, NodeId, NodeRef};
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::traversal::{self, Order, Walk};

/// Height and balance of one subtree, measured in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape {
    height: usize,
    balanced: bool,
}

#[derive(Debug, Clone)]
pub struct BalancedTree<T> {
    nodes: NodeArena<T>,
    root: Option<NodeId>,
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
        }
    }
}

impl<T: Ord> BalancedTree<T> {
    /// Builds a minimal-height tree from any collection.
    ///
    /// The values are sorted and duplicates dropped first; for an even-length
    /// range the lower middle element becomes the subtree root.
    #[instrument(level = "debug", skip_all)]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort();
        values.dedup();
        Self::from_sorted(values)
    }

    /// Adds `value` below the leaf its binary search ends at.
    ///
    /// Values equal to an existing element are not rejected: they take the
    /// right branch like any greater value. The tree is never rebalanced here.
    pub fn insert(&mut self, value: T) {
        self.attach(value);
    }
}

impl<T: Ord> FromIterator<T> for BalancedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: PartialOrd> BalancedTree<T> {
    /// Like [`BalancedTree::new`] for element types without a total order.
    ///
    /// Fails with [`TreeError::Unordered`] naming the input position of the
    /// first value that cannot be ordered against the values before it (for
    /// floats: any NaN).
    #[instrument(level = "debug", skip_all)]
    pub fn try_new<I>(values: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let Some(order) = sorted_order(&values) else {
            let position = first_unordered(&values);
            debug!(position, "rejecting unordered input");
            return Err(TreeError::Unordered { position });
        };

        let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
        let mut sorted: Vec<T> = order.into_iter().filter_map(|i| slots[i].take()).collect();
        sorted.dedup_by(|a, b| (*a).partial_cmp(&*b) == Some(Ordering::Equal));
        Ok(Self::from_sorted(sorted))
    }

    /// Like [`BalancedTree::insert`], but refuses a value that cannot be
    /// compared with a node on its search path. The tree is left untouched
    /// on error.
    pub fn try_insert(&mut self, value: T) -> TreeResult<()> {
        if value.partial_cmp(&value).is_none() {
            return Err(TreeError::Incomparable { depth: 0 });
        }
        let mut cursor = self.root;
        let mut depth = 0;
        while let Some(node) = cursor.and_then(|id| self.nodes.get_node(id)) {
            let ordering = value
                .partial_cmp(&node.value)
                .ok_or(TreeError::Incomparable { depth })?;
            cursor = match ordering {
                Ordering::Less => node.left,
                _ => node.right,
            };
            depth += 1;
        }
        self.attach(value);
        Ok(())
    }

    /// Builds the shape over values already sorted ascending.
    fn from_sorted(values: Vec<T>) -> Self {
        let mut nodes = NodeArena::with_capacity(values.len());
        let ids: Vec<NodeId> = values.into_iter().map(|v| nodes.insert_node(v)).collect();
        let root = Self::link_range(&mut nodes, &ids);
        debug!(nodes = ids.len(), "built balanced tree");
        Self { nodes, root }
    }

    /// Links `ids` (in ascending value order) into a minimal-height subtree
    /// and returns its root.
    fn link_range(nodes: &mut NodeArena<T>, ids: &[NodeId]) -> Option<NodeId> {
        if ids.is_empty() {
            return None;
        }
        let mid = (ids.len() - 1) / 2;
        let left = Self::link_range(nodes, &ids[..mid]);
        let right = Self::link_range(nodes, &ids[mid + 1..]);
        if let Some(node) = nodes.get_node_mut(ids[mid]) {
            node.left = left;
            node.right = right;
        }
        Some(ids[mid])
    }

    #[instrument(level = "trace", skip_all)]
    fn attach(&mut self, value: T) {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.insert_node(value));
            trace!("inserted root");
            return;
        };
        let goes_left = loop {
            let Some(node) = self.nodes.get_node(current) else {
                return;
            };
            let goes_left = value < node.value;
            let next = if goes_left { node.left } else { node.right };
            match next {
                Some(child) => current = child,
                None => break goes_left,
            }
        };
        let leaf = self.nodes.insert_node(value);
        if let Some(node) = self.nodes.get_node_mut(current) {
            if goes_left {
                node.left = Some(leaf);
            } else {
                node.right = Some(leaf);
            }
        }
        trace!(goes_left, "attached new leaf");
    }

    /// Removes the node holding `value`, if any. Returns whether a node was
    /// removed.
    ///
    /// A node with two children takes over the value of its in-order successor,
    /// whose own node is unlinked instead.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn delete(&mut self, value: &T) -> bool {
        // parent of `cursor`, and whether `cursor` hangs on its left
        let mut parent: Option<(NodeId, bool)> = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get_node(id) else {
                return false;
            };
            match value.partial_cmp(&node.value) {
                Some(Ordering::Less) => {
                    parent = Some((id, true));
                    cursor = node.left;
                }
                Some(Ordering::Greater) => {
                    parent = Some((id, false));
                    cursor = node.right;
                }
                Some(Ordering::Equal) => {
                    let replacement = self.unlink(id);
                    self.relink(parent, replacement);
                    debug!(remaining = self.len(), "deleted node");
                    return true;
                }
                // an incomparable value cannot be in the tree
                None => return false,
            }
        }
        false
    }

    /// Takes `id` out of the tree and returns the link that replaces it under
    /// its parent. With two children the node stays and receives its
    /// successor's value.
    fn unlink(&mut self, id: NodeId) -> Option<NodeId> {
        let Some(node) = self.nodes.get_node(id) else {
            return None;
        };
        match (node.left, node.right) {
            (None, right) => {
                self.nodes.remove_node(id);
                right
            }
            (left, None) => {
                self.nodes.remove_node(id);
                left
            }
            (Some(_), Some(right)) => {
                if let Some((right, successor)) = self.detach_min(right) {
                    if let Some(node) = self.nodes.get_node_mut(id) {
                        node.right = right;
                        node.value = successor;
                    }
                    trace!("promoted in-order successor");
                }
                Some(id)
            }
        }
    }

    fn relink(&mut self, parent: Option<(NodeId, bool)>, link: Option<NodeId>) {
        let Some((parent, is_left)) = parent else {
            self.root = link;
            return;
        };
        if let Some(node) = self.nodes.get_node_mut(parent) {
            if is_left {
                node.left = link;
            } else {
                node.right = link;
            }
        }
    }

    /// Unlinks the leftmost node under `subtree` and frees it.
    ///
    /// Returns the new subtree root together with the detached value. The
    /// detached node's right child takes its place: under its former parent's
    /// left link, or as the subtree root when the subtree root itself was the
    /// minimum.
    fn detach_min(&mut self, subtree: NodeId) -> Option<(Option<NodeId>, T)> {
        let mut parent = None;
        let mut current = subtree;
        while let Some(left) = self.nodes.get_node(current)?.left {
            parent = Some(current);
            current = left;
        }
        let min = self.nodes.remove_node(current)?;
        match parent {
            None => Some((min.right, min.value)),
            Some(parent) => {
                if let Some(node) = self.nodes.get_node_mut(parent) {
                    node.left = min.right;
                }
                Some((Some(subtree), min.value))
            }
        }
    }

    /// Binary search for `value`; `None` when the search falls off the tree.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.nodes.get_node(id)?;
            if node.value == *value {
                return Some(id);
            }
            cursor = if *value < node.value {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Number of edges between the root and the first node on the search
    /// path of `id`'s value.
    ///
    /// `None` for a stale handle or a value the search does not reach.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let target = &self.nodes.get_node(id)?.value;
        let mut cursor = self.root;
        let mut depth = 0;
        while let Some(current) = cursor {
            let node = self.nodes.get_node(current)?;
            if node.value == *target {
                return Some(depth);
            }
            cursor = if *target < node.value {
                node.left
            } else {
                node.right
            };
            depth += 1;
        }
        None
    }

    /// Rebuilds the tree into minimal height from its inorder sequence.
    ///
    /// Values are moved into the new shape, not cloned; node handles taken
    /// before the call are stale afterwards.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn rebalance(&mut self) {
        let values = self.drain_sorted();
        *self = Self::from_sorted(values);
        debug!(height = ?self.height(), "rebuilt tree");
    }
}

impl<T> BalancedTree<T> {
    /// Moves every value out in inorder sequence, leaving the tree empty.
    fn drain_sorted(&mut self) -> Vec<T> {
        let order: Vec<NodeId> = self.walk(Order::InOrder).map(|node| node.id()).collect();
        let mut nodes = mem::take(&mut self.nodes);
        self.root = None;
        order
            .into_iter()
            .filter_map(|id| nodes.remove_node(id))
            .map(|node| node.value)
            .collect()
    }

    /// Consumes the tree, returning its values in inorder sequence.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_sorted()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Value behind a handle; `None` once the node has been removed.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get_node(id).map(|node| &node.value)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.nodes.node_ref(id)
    }

    pub(crate) fn nodes(&self) -> &NodeArena<T> {
        &self.nodes
    }

    pub fn min(&self) -> Option<&T> {
        let mut node = self.nodes.get_node(self.root?)?;
        while let Some(left) = node.left.and_then(|id| self.nodes.get_node(id)) {
            node = left;
        }
        Some(&node.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut node = self.nodes.get_node(self.root?)?;
        while let Some(right) = node.right.and_then(|id| self.nodes.get_node(id)) {
            node = right;
        }
        Some(&node.value)
    }

    /// Height of the whole tree: `None` when empty, 1 for a single node.
    pub fn height(&self) -> Option<usize> {
        self.measure(self.root).map(|shape| shape.height)
    }

    /// Height of the subtree rooted at `id`; `None` for a stale handle.
    pub fn height_of(&self, id: NodeId) -> Option<usize> {
        self.measure(Some(id)).map(|shape| shape.height)
    }

    /// Whether every subtree's left and right heights differ by at most one.
    /// `None` for an empty tree.
    pub fn balanced(&self) -> Option<bool> {
        self.measure(self.root).map(|shape| shape.balanced)
    }

    /// [`BalancedTree::balanced`] restricted to the subtree rooted at `id`.
    pub fn is_balanced_at(&self, id: NodeId) -> Option<bool> {
        self.measure(Some(id)).map(|shape| shape.balanced)
    }

    /// Computes height and balance bottom-up in one post-order pass.
    fn measure(&self, root: Option<NodeId>) -> Option<Shape> {
        let root = root.filter(|&id| self.nodes.contains(id))?;
        let mut heights: HashMap<NodeId, usize> = HashMap::new();
        let mut balanced = true;
        for node in traversal::walk(&self.nodes, Some(root), Order::PostOrder) {
            let left = node.left().and_then(|id| heights.remove(&id)).unwrap_or(0);
            let right = node.right().and_then(|id| heights.remove(&id)).unwrap_or(0);
            balanced &= left.abs_diff(right) <= 1;
            heights.insert(node.id(), 1 + left.max(right));
        }
        let height = heights.remove(&root)?;
        Some(Shape { height, balanced })
    }

    /// Lazy walk over the nodes in the given order.
    pub fn walk(&self, order: Order) -> Walk<'_, T> {
        traversal::walk(&self.nodes, self.root, order)
    }

    /// Lazy walk over the values in the given order.
    pub fn values(&self, order: Order) -> impl Iterator<Item = &T> {
        self.walk(order).values()
    }

    pub fn level_order(&self) -> Vec<&T> {
        traversal::collect(&self.nodes, self.root, Order::LevelOrder)
    }

    pub fn inorder(&self) -> Vec<&T> {
        traversal::collect(&self.nodes, self.root, Order::InOrder)
    }

    pub fn preorder(&self) -> Vec<&T> {
        traversal::collect(&self.nodes, self.root, Order::PreOrder)
    }

    pub fn postorder(&self) -> Vec<&T> {
        traversal::collect(&self.nodes, self.root, Order::PostOrder)
    }

    /// Calls `visitor` per node in the given order; nothing is collected.
    pub fn visit<'a, F>(&'a self, order: Order, visitor: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        traversal::visit(&self.nodes, self.root, order, visitor);
    }

    pub fn visit_level_order<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        traversal::visit(&self.nodes, self.root, Order::LevelOrder, visitor);
    }

    pub fn visit_inorder<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        traversal::visit(&self.nodes, self.root, Order::InOrder, visitor);
    }

    pub fn visit_preorder<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        traversal::visit(&self.nodes, self.root, Order::PreOrder, visitor);
    }

    pub fn visit_postorder<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a, T>),
    {
        traversal::visit(&self.nodes, self.root, Order::PostOrder, visitor);
    }
}

/// Input indices in ascending value order (stable), via bottom-up merge sort.
///
/// `None` as soon as a comparison fails. On success every neighbouring pair
/// of the result was compared, so the values form one chain.
fn sorted_order<T: PartialOrd>(values: &[T]) -> Option<Vec<usize>> {
    if values.iter().any(|v| v.partial_cmp(v).is_none()) {
        return None;
    }
    let len = values.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged: Vec<usize> = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        merged.clear();
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if values[order[j]].partial_cmp(&values[order[i]])? == Ordering::Less {
                    merged.push(order[j]);
                    j += 1;
                } else {
                    merged.push(order[i]);
                    i += 1;
                }
            }
            merged.extend_from_slice(&order[i..mid]);
            merged.extend_from_slice(&order[j..end]);
        }
        mem::swap(&mut order, &mut merged);
        width *= 2;
    }
    Some(order)
}

/// Position of the first value not comparable with itself or an earlier one.
/// Only called once sorting failed; quadratic.
fn first_unordered<T: PartialOrd>(values: &[T]) -> usize {
    values
        .iter()
        .enumerate()
        .position(|(p, value)| values[..=p].iter().any(|earlier| earlier.partial_cmp(value).is_none()))
        .unwrap_or(values.len())
}

impl<T> IntoIterator for BalancedTree<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}
