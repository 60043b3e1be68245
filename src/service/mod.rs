//! Request validation ahead of the store.

mod validation;
pub use validation::{parse_id, RequestValidator};
