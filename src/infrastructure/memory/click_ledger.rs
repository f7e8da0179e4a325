//! In-memory click ledger.

use dashmap::DashMap;

use crate::domain::entities::Click;
use crate::domain::repositories::ClickLedger;

/// Click ledger holding every sequence in a concurrent map.
///
/// Sequences are never truncated or reordered. The registry serializes
/// appends per shortcode, so append order equals redirect order.
#[derive(Debug, Default)]
pub struct MemoryClickLedger {
    events: DashMap<String, Vec<Click>>,
}

impl MemoryClickLedger {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }
}

impl ClickLedger for MemoryClickLedger {
    fn open(&self, code: &str) {
        self.events.entry(code.to_string()).or_default();
    }

    fn append(&self, code: &str, click: Click) {
        if let Some(mut events) = self.events.get_mut(code) {
            events.push(click);
            return;
        }

        self.events.entry(code.to_string()).or_default().push(click);
    }

    fn all_events(&self, code: &str) -> Vec<Click> {
        self.events
            .get(code)
            .map(|events| events.value().clone())
            .unwrap_or_default()
    }
}
