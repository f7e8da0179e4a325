//! No-op audit sink.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::audit::{AuditEvent, AuditSink};

/// An audit sink that discards every event.
pub struct NullAuditSink;

impl NullAuditSink {
    pub fn new() -> Self {
        debug!("Using NullAuditSink (auditing disabled)");
        Self
    }
}

impl Default for NullAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for NullAuditSink {
    async fn send(&self, _event: &AuditEvent) -> anyhow::Result<()> {
        Ok(())
    }
}
