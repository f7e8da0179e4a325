//! In-memory shortcode registry.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Click, Link};
use crate::domain::repositories::{ClickLedger, DetailedStats, LinkRepository};
use crate::error::AppError;

/// Registry backed by a sharded concurrent map.
///
/// Per-shortcode atomicity comes from the shard lock: `create` holds the
/// entry while checking and inserting, `record_click` holds the write guard
/// while bumping the counter and appending to the ledger, and `get_stats`
/// holds a read guard while copying the ledger. Locks are always taken
/// registry first, ledger second.
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    ledger: Arc<dyn ClickLedger>,
}

impl MemoryLinkRepository {
    /// Creates an empty registry writing clicks into `ledger`.
    pub fn new(ledger: Arc<dyn ClickLedger>) -> Self {
        Self {
            links: DashMap::new(),
            ledger,
        }
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, link: Link) -> Result<Link, AppError> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Shortcode already exists",
                json!({ "shortcode": link.code }),
            )),
            Entry::Vacant(slot) => {
                self.ledger.open(&link.code);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn record_click(&self, code: &str, click: Click) -> Result<Link, AppError> {
        let mut link = self
            .links
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "shortcode": code })))?;

        if link.is_expired_at(click.clicked_at) {
            return Err(AppError::expired(
                "Shortcode has expired",
                json!({ "shortcode": code, "expiry": link.expires_at }),
            ));
        }

        link.clicks += 1;
        self.ledger.append(code, click);

        Ok(link.value().clone())
    }

    async fn get_stats(&self, code: &str) -> Result<Option<DetailedStats>, AppError> {
        let Some(link) = self.links.get(code) else {
            return Ok(None);
        };

        let clicks = self.ledger.all_events(code);

        Ok(Some(DetailedStats {
            link: link.value().clone(),
            clicks,
        }))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.links.len())
    }
}
