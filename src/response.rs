//! Response bodies that are not plain rows.

use crate::model::Patient;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use std::any::Any;

/// 201 with the created row as the body.
pub fn created<T: Serialize>(row: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(row))
}

#[derive(Debug, Serialize)]
pub struct DeletedPatient {
    pub message: &'static str,
    #[serde(rename = "deletedPatient")]
    pub deleted_patient: Patient,
}

impl DeletedPatient {
    pub fn new(deleted_patient: Patient) -> Self {
        Self {
            message: "Patient deleted successfully",
            deleted_patient,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthBody {
    pub fn now() -> Self {
        Self {
            status: "Server is running",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadyBody {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Fallback for paths no route matches.
pub async fn route_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found", "path": uri.path() })),
    )
        .into_response()
}

/// Body for a handler that panicked. The panic payload is logged, never returned.
pub fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal Server Error",
            "message": "An unexpected error occurred on the server"
        })),
    )
        .into_response()
}
