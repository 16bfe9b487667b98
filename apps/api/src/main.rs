mod config;
mod curriculos;
mod db;
mod errors;
mod models;
mod routes;
mod security;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::curriculos::store::PgCurriculoStore;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::security::CsrfGuard;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Curriculos API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    if config.bootstrap_schema {
        ensure_schema(&db).await?;
    }

    let csrf = match &config.csrf_secret {
        Some(secret) => CsrfGuard::new(secret.clone()),
        None => {
            warn!("CSRF_SECRET not set; using a random secret, tokens will not survive a restart");
            CsrfGuard::with_random_secret()
        }
    };
    info!(
        "Anti-forgery guard {}, security headers {}",
        if config.csrf_enabled { "enforced" } else { "disabled" },
        if config.security_headers { "on" } else { "off" }
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgCurriculoStore::new(db)),
        csrf,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
