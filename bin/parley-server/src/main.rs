//! parley-server – entry point.
//!
//! Startup order:
//! 1. Load `.env` and parse configuration from environment variables;
//!    the process refuses to start without the model credential.
//! 2. Ensure the model backend host bypasses any configured proxy.
//! 3. Initialise structured tracing (JSON or pretty).
//! 4. Build the shared state (gateway client, empty history, no document)
//!    and the Axum router.
//! 5. Start the HTTP server with graceful shutdown.

mod config;
mod error;
mod extract;
mod gateway;
mod middleware;
mod routes;
mod schemas;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::{info, warn};

use crate::config::Config;
use crate::gateway::openai::OpenAiGateway;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env()?;

    // ── 2. Proxy bypass ────────────────────────────────────────────────────────
    // Must happen before the gateway client is built; reqwest snapshots the
    // proxy environment at client construction.
    config::ensure_proxy_bypass(cfg.backend_host());

    // ── 3. Tracing ─────────────────────────────────────────────────────────────
    // Build the log-level filter, warning loudly if the configured value is
    // not a valid tracing filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: PARLEY_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "parley-server starting");

    // ── 4. Shared application state ────────────────────────────────────────────
    let gateway =
        OpenAiGateway::new(&cfg).context("failed to build the model gateway client")?;
    let state = Arc::new(AppState::new(Arc::new(cfg.clone()), Arc::new(gateway)));

    // ── 5. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(Arc::clone(&state));
    let addr: SocketAddr = cfg
        .bind_address
        .parse()
        .context("invalid PARLEY_BIND address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, model = %cfg.model, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("parley-server stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c    => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
