//! Load configuration from environment variables (after `.env`, if the binary loaded one).

use crate::config::types::{DatabaseConfig, ServerConfig};
use std::str::FromStr;

impl ServerConfig {
    /// Read from the process environment. Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let db = defaults.database.clone();
        ServerConfig {
            port: parsed(&lookup, "PORT", defaults.port),
            body_limit_bytes: parsed(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes),
            database: DatabaseConfig {
                host: text(&lookup, "DB_HOST", db.host),
                port: parsed(&lookup, "DB_PORT", db.port),
                user: text(&lookup, "DB_USER", db.user),
                password: text(&lookup, "DB_PASSWORD", db.password),
                name: text(&lookup, "DB_NAME", db.name),
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", db.max_connections),
            },
        }
    }
}

fn text<F>(lookup: &F, key: &str, default: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "ignoring unparseable setting");
            default
        }),
        None => default,
    }
}
