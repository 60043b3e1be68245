//! Configuration types with their fixed defaults.

use sqlx::postgres::PgConnectOptions;
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Connection parameters for the clinic database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: "12345".into(),
            name: "clinic_test".into(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Options for the clinic database itself.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.server_options().database(&self.name)
    }

    /// Options for the maintenance database, used to create the clinic database when missing.
    pub fn admin_connect_options(&self) -> PgConnectOptions {
        self.server_options().database("postgres")
    }

    fn server_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub body_limit_bytes: usize,
    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
