//! Background delivery of audit events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::audit::{AuditEvent, AuditSink};

/// Drains the audit queue into `sink` until every sender is dropped.
///
/// Sink failures are logged at `DEBUG` and discarded; nothing is retried.
pub async fn run_audit_worker(mut rx: mpsc::Receiver<AuditEvent>, sink: Arc<dyn AuditSink>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = sink.send(&event).await {
            debug!(error = %e, package = event.package, "Audit event discarded");
        }
    }

    debug!("Audit worker stopped");
}
