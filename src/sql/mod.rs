//! SQL text for the clinic tables: DDL, demo seed rows, and the per-route statements.
//! Values are always bound as parameters.

pub mod queries;
pub mod schema;
pub use queries::*;
pub use schema::*;

/// `ILIKE` pattern matching `fragment` anywhere in the column.
pub fn contains_pattern(fragment: &str) -> String {
    format!("%{}%", fragment)
}
