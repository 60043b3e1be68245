//! Integer row id from the last path segment.

use crate::error::AppError;
use crate::service::parse_id;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RowId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_id(&raw).map(RowId)
    }
}
