//! Application settings and the HTTP server configuration built from them.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use foodgram::inbound::http::session_config::{SessionOptions, SessionSettings};
use foodgram::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings read from `FOODGRAM_*` environment variables, CLI flags or a
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODGRAM")]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key in release builds.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppConfig {
    /// Return the listen address, falling back to port 8080 on all interfaces.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Session inputs for [`foodgram::inbound::http::session_config::session_settings`].
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.cookie_secure,
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
        }
    }
}
