//! Process-local storage for the registry and click ledger.
//!
//! State lives for the lifetime of the process; nothing is persisted.

mod click_ledger;
mod link_repository;

pub use click_ledger::MemoryClickLedger;
pub use link_repository::MemoryLinkRepository;
