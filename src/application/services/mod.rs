//! Application services
//!
//! Concrete service implementations that orchestrate domain logic for the CLI.

mod driver;
mod tree;

pub use driver::{random_keys, DemoDriver, DemoReport, TraversalSnapshot};
pub use tree::{BuildOutcome, BuildRequest, Location, TreeService};
