//! Extractors that turn axum rejections into [`crate::error::AppError`] so every client error
//! carries the same JSON shape.

mod id;
mod json;

pub use id::RowId;
pub use json::JsonBody;
