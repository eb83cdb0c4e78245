//! Text renderings of a tree's shape.
//!
//! Both renderers work from explicit worklists, so a tree degenerated into a
//! chain is drawn without deep recursion.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeArena, NodeId};
use crate::domain::traversal::{self, Order};
use crate::domain::tree::BalancedTree;

const EMPTY_TREE: &str = "Tree is empty.";
const MISSING_CHILD: &str = "∅";

pub trait TreeDisplay {
    /// Sideways drawing: right subtree above, left subtree below its parent.
    fn write_pretty<W: Write>(&self, out: &mut W) -> fmt::Result;

    fn pretty(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_pretty(&mut out);
        out
    }

    /// Top-down drawing with children listed left then right.
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeDisplay for BalancedTree<T> {
    #[instrument(level = "trace", skip_all)]
    fn write_pretty<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self.root() {
            Some(root) => write_sideways(self.nodes(), root, out),
            None => writeln!(out, "{}", EMPTY_TREE),
        }
    }

    #[instrument(level = "trace", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build_tree(self.nodes(), root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Pending work of the sideways printer.
///
/// Prefixes share one growing buffer: a step only records how much of it
/// belongs to its context (`base`) or to its own line (`prefix_len`).
#[derive(Debug, Clone, Copy)]
enum Step {
    Subtree {
        id: NodeId,
        base: usize,
        segment: &'static str,
        is_left: bool,
    },
    Line {
        id: NodeId,
        prefix_len: usize,
        is_left: bool,
    },
}

fn write_sideways<T: Display, W: Write>(nodes: &NodeArena<T>, root: NodeId, out: &mut W) -> fmt::Result {
    let mut prefix = String::new();
    let mut steps = vec![Step::Subtree {
        id: root,
        base: 0,
        segment: "",
        is_left: true,
    }];

    while let Some(step) = steps.pop() {
        match step {
            Step::Subtree {
                id,
                base,
                segment,
                is_left,
            } => {
                let Some(node) = nodes.get_node(id) else {
                    continue;
                };
                prefix.truncate(base);
                prefix.push_str(segment);
                let own = prefix.len();

                // popped in reverse: right subtree, the node, left subtree
                if let Some(left) = node.left {
                    steps.push(Step::Subtree {
                        id: left,
                        base: own,
                        segment: if is_left { "    " } else { "|   " },
                        is_left: true,
                    });
                }
                steps.push(Step::Line {
                    id,
                    prefix_len: own,
                    is_left,
                });
                if let Some(right) = node.right {
                    steps.push(Step::Subtree {
                        id: right,
                        base: own,
                        segment: if is_left { "|   " } else { "    " },
                        is_left: false,
                    });
                }
            }
            // steps run in between only extend the buffer past `prefix_len`
            Step::Line {
                id,
                prefix_len,
                is_left,
            } => {
                let Some(node) = nodes.get_node(id) else {
                    continue;
                };
                writeln!(
                    out,
                    "{}{}{}",
                    &prefix[..prefix_len],
                    if is_left { "└── " } else { "┌── " },
                    node.value
                )?;
            }
        }
    }
    Ok(())
}

/// Assembles the termtree bottom-up from a post-order walk.
fn build_tree<T: Display>(nodes: &NodeArena<T>, root: NodeId) -> Tree<String> {
    let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
    for node in traversal::walk(nodes, Some(root), Order::PostOrder) {
        let mut child = |link: Option<NodeId>| {
            link.and_then(|id| built.remove(&id))
                .unwrap_or_else(|| Tree::new(MISSING_CHILD.to_string()))
        };
        let leaves = match (node.left(), node.right()) {
            (None, None) => Vec::new(),
            // keep a placeholder so a lone child still shows its side
            (left, right) => vec![child(left), child(right)],
        };
        built.insert(node.id(), Tree::new(node.value().to_string()).with_leaves(leaves));
    }
    built
        .remove(&root)
        .unwrap_or_else(|| Tree::new(MISSING_CHILD.to_string()))
}
