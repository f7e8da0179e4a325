//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the registry and click ledger storage. Concrete
//! implementations live in `crate::infrastructure::memory`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Shortcode registry (create, resolve, stats)
//! - [`ClickLedger`] - Append-only click log per shortcode

pub mod click_ledger;
pub mod link_repository;

pub use click_ledger::ClickLedger;
pub use link_repository::{DetailedStats, LinkRepository};

#[cfg(test)]
pub use click_ledger::MockClickLedger;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
