//! Audit sinks receiving events from the background audit worker.
//!
//! - [`TracingAuditSink`] - Emits each event as a structured `tracing` record
//! - [`NullAuditSink`] - No-op sink for tests or disabled auditing

mod null_sink;
mod tracing_sink;

pub use null_sink::NullAuditSink;
pub use tracing_sink::TracingAuditSink;
