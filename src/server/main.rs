use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use promptscan::common::resolve_storage_path;
use promptscan::process::ProcessorConfig;
use promptscan::store::{PromptStore, SqliteStorage};
use promptscan_app::common::init_logger_exe;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

mod service;
use crate::service::{router, AppState};

// Several full-resolution screenshots as base64 fit comfortably.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() {
    init_logger_exe();

    if let Err(err) = run().await {
        log::error!("Server stopped: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    log::info!("Starting server...");

    let db_path = resolve_storage_path(std::env::var("PROMPTSCAN_DB").ok().as_deref())?;
    let storage = SqliteStorage::open(&db_path)?;
    log::info!("Prompt library at {}", db_path.display());

    let state = AppState::new(PromptStore::new(storage), ProcessorConfig::default());
    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
    );

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let port: u16 = port
        .parse()
        .with_context(|| format!("Invalid PORT value: {}", port))?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    log::info!("Attempting to bind to port {}", port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    log::info!("Successfully bound to http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    log::warn!("Ctrl-C received, stopping...");
}
