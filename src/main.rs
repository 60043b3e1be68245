//! Clinic API server: loads `.env`, builds the PostgreSQL pool, serves the router.

use clinic_api::store::{connect_lazy, ensure_database_exists, check_connection};
use clinic_api::{app, AppState, PgStore, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clinic_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    if let Err(e) = ensure_database_exists(&config.database).await {
        tracing::warn!(error = %e, database = %config.database.name, "could not ensure database exists");
    }
    let pool = connect_lazy(&config.database);
    check_connection(&pool).await;

    let state = AppState::new(PgStore::new(pool));
    let listener = TcpListener::bind(config.listen_addr()).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("server listening on port {}", port);
    tracing::info!("health check: http://localhost:{}/health", port);
    tracing::info!("setup db: http://localhost:{}/setup-db", port);

    axum::serve(listener, app(state, config.body_limit_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
