//! # linkledger
//!
//! An in-memory URL shortening service with per-click analytics, built with Axum.
//!
//! ## Architecture
//!
//! The crate keeps a layered layout:
//!
//! - **Domain Layer** ([`domain`]) - Shortcode and click entities, repository traits, audit events
//! - **Application Layer** ([`application`]) - Shortcode creation, resolution and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - Concurrent in-memory registry, click ledger, audit sinks
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or caller-chosen shortcodes with a bounded validity window
//! - Redirects that record every click (timestamp, referrer, origin) atomically
//! - Per-shortcode statistics with the full ordered click history
//! - Asynchronous audit logging that never blocks a request
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3000"
//! cargo run
//!
//! curl -X POST localhost:3000/shorturls \
//!      -H 'content-type: application/json' \
//!      -d '{"url":"https://example.com","validity":60}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, StatsService};
    pub use crate::domain::audit::{AuditEvent, AuditLevel, AuditLogger};
    pub use crate::domain::entities::{Click, Link, NewClick, NewLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
