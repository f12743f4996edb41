use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Tdr;

/// One reconstructed past version of a record plus its commit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Hash of the transaction that committed this version
    pub transaction_id: String,

    /// Commit time of the version
    pub timestamp: DateTime<Utc>,

    /// Whether this entry removed the key from the current state
    pub is_delete: bool,

    /// The record as of this version; absent for delete entries
    pub value: Option<Tdr>,
}

/// Replays a key's append-only change log into typed history entries.
///
/// Read-only; bypasses the lifecycle controller and sees the transaction's
/// read snapshot.
pub struct HistoryTracker<'a> {
    ledger: &'a dyn Ledger,
}

impl<'a> HistoryTracker<'a> {
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self { ledger }
    }

    /// The full audit trail for `id`, oldest write first. An unknown id
    /// yields an empty trail, not an error. A decode failure on any entry
    /// aborts the whole walk.
    pub fn history(&self, id: &str) -> Result<Vec<HistoryEntry>, LedgerError> {
        let mut entries = Vec::new();
        for item in self.ledger.history(id) {
            let write = item?;
            let value = match (write.is_delete, write.value) {
                (false, Some(bytes)) => Some(Tdr::decode(&bytes)?),
                _ => None,
            };
            entries.push(HistoryEntry {
                transaction_id: write.transaction_id,
                timestamp: write.timestamp,
                is_delete: write.is_delete,
                value,
            });
        }
        Ok(entries)
    }
}
