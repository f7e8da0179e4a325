//! Audit sink that writes events through `tracing`.

use async_trait::async_trait;

use crate::domain::audit::{AuditEvent, AuditLevel, AuditSink};

/// Emits audit events on the `audit` target.
///
/// Events keep their own severity; `fatal` is reported at `ERROR` since
/// `tracing` has no higher level. Filter them independently with
/// `RUST_LOG=audit=info`.
#[derive(Debug, Clone)]
pub struct TracingAuditSink {
    stack: &'static str,
}

impl TracingAuditSink {
    /// Creates a sink tagging every event with `stack` (e.g. `"backend"`).
    pub fn new(stack: &'static str) -> Self {
        Self { stack }
    }
}

impl Default for TracingAuditSink {
    fn default() -> Self {
        Self::new("backend")
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn send(&self, event: &AuditEvent) -> anyhow::Result<()> {
        let stack = self.stack;
        let package = event.package;
        let message = event.message.as_str();

        match event.level {
            AuditLevel::Debug => {
                tracing::debug!(target: "audit", stack, package, "{message}")
            }
            AuditLevel::Info => {
                tracing::info!(target: "audit", stack, package, "{message}")
            }
            AuditLevel::Warn => {
                tracing::warn!(target: "audit", stack, package, "{message}")
            }
            AuditLevel::Error => {
                tracing::error!(target: "audit", stack, package, "{message}")
            }
            AuditLevel::Fatal => {
                tracing::error!(target: "audit", stack, package, fatal = true, "{message}")
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_sink_accepts_every_level() {
        let sink = TracingAuditSink::default();

        for level in [
            AuditLevel::Debug,
            AuditLevel::Info,
            AuditLevel::Warn,
            AuditLevel::Error,
            AuditLevel::Fatal,
        ] {
            let event = AuditEvent::new(level, "registry", "test event");
            assert!(sink.send(&event).await.is_ok());
        }
    }
}
