//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::audit::AuditLogger;
use crate::domain::repositories::ClickLedger;
use crate::infrastructure::memory::{MemoryClickLedger, MemoryLinkRepository};

/// Handler state. Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<MemoryLinkRepository>>,
    pub stats_service: Arc<StatsService<MemoryLinkRepository>>,
    pub audit: AuditLogger,
    /// Public base URL short links are built on (e.g. `https://s.example.com`).
    pub base_url: String,
    /// Read the click origin from proxy headers instead of the peer address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires a fresh, empty registry and ledger behind both services.
    pub fn new(
        audit: AuditLogger,
        base_url: impl Into<String>,
        default_validity_minutes: i64,
        behind_proxy: bool,
    ) -> Self {
        let ledger: Arc<dyn ClickLedger> = Arc::new(MemoryClickLedger::new());
        let repository = Arc::new(MemoryLinkRepository::new(ledger));

        Self::with_repository(
            repository,
            audit,
            base_url,
            default_validity_minutes,
            behind_proxy,
        )
    }

    /// Wires both services over an existing registry.
    pub fn with_repository(
        repository: Arc<MemoryLinkRepository>,
        audit: AuditLogger,
        base_url: impl Into<String>,
        default_validity_minutes: i64,
        behind_proxy: bool,
    ) -> Self {
        let link_service = Arc::new(
            LinkService::new(repository.clone(), audit.clone())
                .with_default_validity(default_validity_minutes),
        );
        let stats_service = Arc::new(StatsService::new(repository, audit.clone()));

        Self {
            link_service,
            stats_service,
            audit,
            base_url: base_url.into(),
            behind_proxy,
        }
    }
}
