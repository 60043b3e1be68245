//! Service routes: health, readiness, version, statistics, database setup.

use crate::handlers::{health, ready, setup_db, stats, version};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Routes that need no state: GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// GET /ready, GET /stats, GET /setup-db.
pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/stats", get(stats))
        .route("/setup-db", get(setup_db))
        .with_state(state)
}
