//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Registry records and click events
//! - [`repositories`] - Registry and click ledger trait definitions
//! - [`audit`] - Audit event model, sink trait and non-blocking logger
//! - [`audit_worker`] - Background delivery of audit events
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::LinkService::resolve`] records the click
//!    through [`repositories::LinkRepository::record_click`], which bumps the
//!    counter and appends to the ledger in one step
//! 3. An [`audit::AuditEvent`] is queued for [`audit_worker::run_audit_worker`]
//! 4. The handler answers with a redirect

pub mod audit;
pub mod audit_worker;
pub mod entities;
pub mod repositories;
