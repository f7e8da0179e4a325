//! Click statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::audit::{AuditLevel, AuditLogger};
use crate::domain::repositories::{DetailedStats, LinkRepository};
use crate::error::AppError;

/// Service for reading per-shortcode click statistics.
///
/// Expired shortcodes still report their stats: expiry blocks redirects,
/// not introspection. Reads never mutate the registry.
pub struct StatsService<R: LinkRepository> {
    repository: Arc<R>,
    audit: AuditLogger,
}

impl<R: LinkRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>, audit: AuditLogger) -> Self {
        Self { repository, audit }
    }

    /// Retrieves the record and its full ordered click list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    pub async fn get_detailed_stats(&self, code: &str) -> Result<DetailedStats, AppError> {
        let result = self.repository.get_stats(code).await.and_then(|stats| {
            stats.ok_or_else(|| {
                AppError::not_found("Shortcode not found", json!({ "shortcode": code }))
            })
        });

        match &result {
            Ok(stats) => self.audit.record(
                AuditLevel::Info,
                "stats",
                format!(
                    "Stats served for {} ({} clicks)",
                    stats.link.code, stats.link.clicks
                ),
            ),
            Err(e) => self.audit.record(
                AuditLevel::Warn,
                "stats",
                format!("Stats lookup failed for {code}: {e}"),
            ),
        }

        result
    }

    /// Counts registered shortcodes, expired ones included.
    pub async fn count_links(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}
