//! HTTP handlers, one per (verb, path).

pub mod appointments;
pub mod doctors;
pub mod patients;
pub mod system;
pub use appointments::*;
pub use doctors::*;
pub use patients::*;
pub use system::*;
