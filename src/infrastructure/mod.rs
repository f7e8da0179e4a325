//! Infrastructure layer: concrete storage and external collaborators.
//!
//! - [`memory`] - In-memory registry and click ledger
//! - [`audit`] - Audit sink implementations

pub mod audit;
pub mod memory;
