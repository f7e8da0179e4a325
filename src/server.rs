//! HTTP server initialization and runtime setup.
//!
//! Handles audit pipeline setup, worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::audit::{AuditLogger, AuditSink};
use crate::domain::audit_worker::run_audit_worker;
use crate::infrastructure::audit::TracingAuditSink;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Audit channel and background audit worker (when enabled)
/// - In-memory registry and click ledger
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - `listen_addr` is not a socket address
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let audit = if config.audit_enabled {
        let (audit_tx, audit_rx) = mpsc::channel(config.audit_queue_capacity);
        let sink: Arc<dyn AuditSink> = Arc::new(TracingAuditSink::default());
        tokio::spawn(run_audit_worker(audit_rx, sink));
        tracing::info!("Audit worker started");
        AuditLogger::new(audit_tx)
    } else {
        tracing::info!("Audit disabled");
        AuditLogger::disabled()
    };

    let state = AppState::new(
        audit,
        config.base_url.trim_end_matches('/'),
        config.default_validity_minutes,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
