//! Application layer services implementing business logic.
//!
//! Services validate input, apply registry rules and emit audit events,
//! delegating storage to the repository traits.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortcode creation and redirect resolution
//! - [`services::stats_service::StatsService`] - Per-shortcode click statistics

pub mod services;
