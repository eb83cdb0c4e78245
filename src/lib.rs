//! Binary search tree balanced by rebuilding from its sorted contents.
//!
//! ```
//! use bstree::BalancedTree;
//!
//! let mut tree = BalancedTree::new([7, 4, 23, 8, 9, 4, 3]);
//! tree.insert(42);
//! assert_eq!(tree.inorder(), vec![&3, &4, &7, &8, &9, &23, &42]);
//! assert!(tree.find(&42).is_some());
//!
//! tree.rebalance();
//! assert_eq!(tree.balanced(), Some(true));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{BalancedTree, NodeId, NodeRef, Order, TreeDisplay, TreeError, TreeResult};
