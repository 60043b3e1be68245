//! Service-level handlers: statistics, health, readiness, version, and database setup.

use crate::error::AppError;
use crate::model::ClinicStats;
use crate::response::{HealthBody, MessageBody, ReadyBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /stats — the three counts run concurrently; any failure fails the whole response.
pub async fn stats(State(state): State<AppState>) -> Result<Json<ClinicStats>, AppError> {
    let store = &state.store;
    let (total_patients, appointments_today, available_doctors) = tokio::try_join!(
        store.count_patients(),
        store.count_todays_appointments(),
        store.count_doctors(),
    )?;
    Ok(Json(ClinicStats {
        total_patients,
        appointments_today,
        available_doctors,
    }))
}

/// GET /health — never touches the store.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody::now())
}

/// GET /ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /setup-db — create tables and seed demo rows; safe to call repeatedly.
pub async fn setup_db(State(state): State<AppState>) -> Result<Json<MessageBody>, AppError> {
    state.store.setup().await.map_err(AppError::Setup)?;
    tracing::info!("database setup complete");
    Ok(Json(MessageBody {
        message: "Database created/prepared successfully",
    }))
}
