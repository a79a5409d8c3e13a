//! # tm-server
//!
//! JSON HTTP API over [`tm_db::TmService`], built on axum.
//!
//! Every route except `/health`, `/auth/signup` and `/auth/login` requires
//! an `Authorization: Bearer <token>` header obtained from `/auth/login`.
//! When `scheduler.interval_secs` is non-zero, [`serve`] also runs the
//! scheduler periodically in the background.

pub mod background;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use tm_config::TmConfig;
use tm_db::TmService;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;

/// Open the database, bind, and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the database cannot be
/// opened, or the listener fails.
pub async fn serve(config: &TmConfig) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let svc = TmService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database {}", config.database.path))?;
    let state = AppState::new(Arc::new(svc), config);

    let scheduler = config
        .scheduler
        .interval()
        .map(|every| background::spawn_scheduler(Arc::clone(&state.svc), every));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, database = %config.database.path, "taskmaster listening");

    let result = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed");

    if let Some(handle) = scheduler {
        handle.abort();
    }
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
