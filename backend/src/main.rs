//! Foodgram entry-point: loads settings, prepares the database and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodgram::inbound::http::health::HealthState;
use foodgram::inbound::http::session_config::{BuildMode, session_settings};
use foodgram::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{AppConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;

    let session = session_settings(&config.session_options(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    if config.run_migrations {
        run_pending_migrations(&config.database_url)
            .await
            .wrap_err("failed to apply migrations")?;
        info!("migrations applied");
    }

    let pool = DbPool::new(
        PoolConfig::new(config.database_url.clone()).with_max_size(config.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(session, config.bind_addr(), pool),
    )
    .wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server stopped with an error")
}
