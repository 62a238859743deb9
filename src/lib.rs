//! bstree: a binary search tree over unique integer keys that is built
//! height-balanced, mutated without automatic rebalancing, and rebuilt
//! minimum-height on request.
//!
//! Layers:
//! - [`domain`]: the tree, traversals and renderers (no I/O)
//! - [`application`]: services used by the CLI (demo driver, batch builds)
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{BalancedBst, DomainError, Key, Node, NodeId, TraversalOrder};
