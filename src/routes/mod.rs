//! Router assembly.

mod clinic;
mod common;

pub use clinic::clinic_routes;
pub use common::{common_routes, service_routes};

use crate::response::{internal_error, route_not_found};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// The full application: every route behind [`with_middleware`].
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    let routes = Router::new()
        .merge(common_routes())
        .merge(service_routes(state.clone()))
        .merge(clinic_routes(state));
    with_middleware(routes, body_limit_bytes)
}

/// Wraps `routes` the way the server runs them. Unknown paths and known paths hit with the wrong
/// method both get the JSON 404; bodies past the limit are rejected as JSON 413; panics become
/// a generic 500; any origin may call the API.
pub fn with_middleware(routes: Router, body_limit_bytes: usize) -> Router {
    routes
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
