//! Clinic API: patients, doctors and appointments over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{AppError, StoreError};
pub use routes::{app, clinic_routes, common_routes, service_routes, with_middleware};
pub use state::AppState;
pub use store::{ClinicStore, MemoryStore, PgStore};
