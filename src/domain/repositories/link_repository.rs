//! Repository trait for the shortcode registry.

use crate::domain::entities::{Click, Link};
use crate::error::AppError;
use async_trait::async_trait;

/// A consistent snapshot of one record and its full click history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedStats {
    pub link: Link,
    pub clicks: Vec<Click>,
}

/// Repository interface for the shortcode registry.
///
/// Every method is atomic per shortcode: two callers racing on the same code
/// observe one of the two orderings, never an interleaving. Implementations
/// own the matching click ledger entries so a redirect can bump the counter
/// and append the click as one step.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - process-local in-memory store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new record and opens its empty click ledger.
    ///
    /// The existence check and the insert happen under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortcodeConflict`] if the shortcode is already taken.
    async fn create(&self, link: Link) -> Result<Link, AppError>;

    /// Records a served redirect.
    ///
    /// Checks expiry against `click.clicked_at`, then increments the click
    /// count and appends the click to the ledger. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists.
    /// Returns [`AppError::Expired`] if the record expired before the click.
    async fn record_click(&self, code: &str, click: Click) -> Result<Link, AppError>;

    /// Returns the record and its ordered click list, or `None` if absent.
    async fn get_stats(&self, code: &str) -> Result<Option<DetailedStats>, AppError>;

    /// Counts all records, expired ones included.
    async fn count(&self) -> Result<usize, AppError>;
}
