//! Domain layer: the tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod node;
pub mod render;
pub mod traversal;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::{Key, Node, NodeId};
pub use render::{render, render_pretty, RenderStyle, TreeNodeConvert};
pub use traversal::TraversalOrder;
pub use tree::{sorted_unique, BalancedBst};
