//! Audit event model and the non-blocking handle services log through.
//!
//! Services describe what happened to each registry operation as an
//! [`AuditEvent`] and hand it to an [`AuditLogger`]. The logger only enqueues;
//! delivery to an [`AuditSink`] happens on a background task
//! ([`crate::domain::audit_worker::run_audit_worker`]), so a slow or failing
//! sink can never delay or fail a registry operation.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

/// Severity attached to an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditLevel::Debug => "debug",
            AuditLevel::Info => "info",
            AuditLevel::Warn => "warn",
            AuditLevel::Error => "error",
            AuditLevel::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// One audit record: severity, emitting component and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    pub level: AuditLevel,
    pub package: &'static str,
    pub message: String,
}

impl AuditEvent {
    pub fn new(level: AuditLevel, package: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            package,
            message: message.into(),
        }
    }
}

/// Destination for audit events.
///
/// # Implementations
///
/// - [`crate::infrastructure::audit::TracingAuditSink`] - structured `tracing` events
/// - [`crate::infrastructure::audit::NullAuditSink`] - discards everything
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Delivers one event. Errors are logged and discarded by the worker.
    async fn send(&self, event: &AuditEvent) -> anyhow::Result<()>;
}

/// Cloneable, non-blocking handle for recording audit events.
///
/// Backed by a bounded channel. When the queue is full or the worker is gone
/// the event is dropped; callers never observe an error.
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    sender: Option<mpsc::Sender<AuditEvent>>,
}

impl AuditLogger {
    /// Creates a logger that enqueues onto `sender`.
    pub fn new(sender: mpsc::Sender<AuditEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Creates a logger that drops every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Enqueues an event without waiting.
    pub fn record(&self, level: AuditLevel, package: &'static str, message: impl Into<String>) {
        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(AuditEvent::new(level, package, message)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("audit_events_dropped_total", "reason" => "full").increment(1);
                warn!(package = event.package, "Audit queue full, dropping event");
            }
            Err(TrySendError::Closed(_)) => {
                metrics::counter!("audit_events_dropped_total", "reason" => "closed").increment(1);
            }
        }
    }

    /// Returns the current free capacity of the queue, if enabled.
    pub fn capacity(&self) -> Option<usize> {
        self.sender.as_ref().map(|s| s.capacity())
    }

    /// Returns true if the worker side of the queue has shut down.
    pub fn is_closed(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| s.is_closed())
    }
}
