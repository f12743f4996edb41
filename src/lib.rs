pub mod contract;
pub mod error;
pub mod history;
pub mod ledger;
pub mod lifecycle;
pub mod memory;
pub mod query;
pub mod record;
pub mod store;

// Re-export the main types for convenience
pub use contract::TdrContract;
pub use error::LedgerError;
pub use history::{HistoryEntry, HistoryTracker};
pub use ledger::{
    Ledger, LedgerHistoryIterator, LedgerQueryIterator, Selector, SelectorField, WriteRecord,
};
pub use lifecycle::LifecycleController;
pub use memory::MemoryLedger;
pub use query::QueryEngine;
pub use record::Tdr;
pub use store::EntityStore;
