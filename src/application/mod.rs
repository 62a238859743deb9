//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic on behalf of the CLI.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
