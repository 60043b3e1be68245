//! Server and database configuration.

pub mod loader;
pub mod types;

pub use types::*;
