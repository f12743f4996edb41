use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// One entry in a key's append-only change log.
///
/// `value` is the raw serialized record at that point in time; delete
/// entries carry no value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRecord {
    /// Hash of the transaction that produced this write
    pub transaction_id: String,

    /// Commit time of the write
    pub timestamp: DateTime<Utc>,

    /// Whether this entry removed the key from the current state
    pub is_delete: bool,

    /// The serialized record written, absent for deletes
    pub value: Option<Vec<u8>>,
}

/// Record fields the platform's secondary index can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorField {
    Owner,
    Issuer,
}

impl SelectorField {
    /// The field's wire name inside the stored JSON document.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SelectorField::Owner => "owner",
            SelectorField::Issuer => "issuer",
        }
    }
}

/// An equality-filter specification handed to the ledger's secondary index.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Match every record in the key space
    All,

    /// Match records whose `field` equals `value`
    FieldEq {
        field: SelectorField,
        value: String,
    },
}

impl Selector {
    /// Selector matching all records.
    pub fn all() -> Self {
        Selector::All
    }

    /// Selector matching records currently held by `owner`.
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Selector::FieldEq {
            field: SelectorField::Owner,
            value: owner.into(),
        }
    }
}

/// Iterator over the (key, raw value) pairs matched by a selector
pub trait LedgerQueryIterator: Iterator<Item = Result<(String, Vec<u8>), LedgerError>> {}

/// Iterator over a key's change log, oldest entry first
pub trait LedgerHistoryIterator: Iterator<Item = Result<WriteRecord, LedgerError>> {}

/// The versioned key-value ledger the core runs on.
///
/// `put` durably persists the new value as the current version for `key` and
/// appends it to that key's change log. Concurrency across callers touching
/// the same key is resolved by the platform's optimistic commit-time version
/// check, not by this interface, so implementations take no locks on behalf
/// of callers.
pub trait Ledger {
    /// Get the current value for a key
    ///
    /// # Returns
    /// Some(bytes) if the key has a current value, None otherwise
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Store a value as the current version for a key
    fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// Run a selector against the secondary index
    ///
    /// # Returns
    /// An iterator over matching (key, raw value) pairs, in index order
    fn query(&self, selector: &Selector) -> Box<dyn LedgerQueryIterator + '_>;

    /// Walk the append-only change log for a key
    ///
    /// # Returns
    /// An iterator over the key's writes and deletes, oldest first; empty
    /// for a key that was never written
    fn history(&self, key: &str) -> Box<dyn LedgerHistoryIterator + '_>;
}
