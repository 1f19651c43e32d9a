use std::sync::Arc;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use muvhr::access::AccessGate;
use muvhr::api::{self, AppState};
use muvhr::config::AppConfig;
use muvhr::store::seed_missing;

/// Stderr logging, plus a daily-rolling file when a log directory is set.
/// The returned guard must live until shutdown so buffered lines are flushed.
fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "muvhr.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();
    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let _log_guard = init_tracing(&config);

    eprintln!("MuvHR v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listening: http://{}", config.bind);
    eprintln!("   Store: {:?}", config.store);

    let gate = AccessGate::new(
        config
            .permission_table()
            .context("Failed to load permission table")?,
    );

    // ── Store ────────────────────────────────────────────────────────────
    let store = config
        .open_store()
        .await
        .context("Failed to open record store")?;
    if config.seed {
        let seeded = seed_missing(store.as_ref())
            .await
            .context("Failed to seed record store")?;
        if !seeded.is_empty() {
            tracing::info!(count = seeded.len(), "Seeded missing collections");
        }
    }

    let state = AppState::load(Arc::clone(&store), gate, config.upload_dir.clone())
        .await
        .context("Failed to load records")?;

    // ── Server ───────────────────────────────────────────────────────────
    let app = api::router(state, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "MuvHR server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("MuvHR server stopped");
    Ok(())
}
