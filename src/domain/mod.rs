//! Domain layer: the search tree and its traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod display;
pub mod error;
pub mod traversal;
pub mod tree;

pub use arena::{Node, NodeArena, NodeId, NodeRef};
pub use display::TreeDisplay;
pub use error::{TreeError, TreeResult};
pub use traversal::{Order, Walk};
pub use tree::BalancedTree;
