use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::LedgerError;
use crate::ledger::{
    Ledger, LedgerHistoryIterator, LedgerQueryIterator, Selector, WriteRecord,
};

/// In-memory ledger backend with a per-key change log.
///
/// Stands in for the platform ledger in tests and embedded use. Selector
/// matching parses the stored JSON document and compares the selected field,
/// which is what the platform's secondary index does against its own copy.
/// The mutex exists for interior mutability through `&self`; cross-caller
/// concurrency control stays the platform's job.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    current: HashMap<String, Vec<u8>>,
    log: HashMap<String, Vec<WriteRecord>>,
    write_counter: u64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `key` from the current state, appending a delete entry to its
    /// change log. Not part of the `Ledger` trait: the core never deletes,
    /// but the platform can, and history replay must cope with the entries
    /// it leaves behind.
    pub fn delete(&self, key: &str) -> Result<(), LedgerError> {
        let mut state = self.lock()?;
        state.current.remove(key);
        state.write_counter += 1;
        let record = WriteRecord {
            transaction_id: transaction_id(state.write_counter, key),
            timestamp: Utc::now(),
            is_delete: true,
            value: None,
        };
        state.log.entry(key.to_string()).or_default().push(record);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Other("memory ledger mutex poisoned".to_string()))
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let state = self.lock()?;
        Ok(state.current.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let mut state = self.lock()?;
        state.write_counter += 1;
        let record = WriteRecord {
            transaction_id: transaction_id(state.write_counter, key),
            timestamp: Utc::now(),
            is_delete: false,
            value: Some(value.to_vec()),
        };
        state.current.insert(key.to_string(), value.to_vec());
        state.log.entry(key.to_string()).or_default().push(record);
        Ok(())
    }

    fn query(&self, selector: &Selector) -> Box<dyn LedgerQueryIterator + '_> {
        let items = match self.lock() {
            Ok(state) => {
                let mut items = Vec::new();
                for (key, bytes) in state.current.iter() {
                    match matches_selector(selector, bytes) {
                        Ok(true) => items.push(Ok((key.clone(), bytes.clone()))),
                        Ok(false) => {}
                        Err(err) => {
                            items.push(Err(err));
                            break;
                        }
                    }
                }
                items
            }
            Err(err) => vec![Err(err)],
        };
        Box::new(MemoryQueryIterator {
            items: items.into_iter(),
        })
    }

    fn history(&self, key: &str) -> Box<dyn LedgerHistoryIterator + '_> {
        let items = match self.lock() {
            Ok(state) => state
                .log
                .get(key)
                .map(|entries| entries.iter().cloned().map(Ok).collect())
                .unwrap_or_default(),
            Err(err) => vec![Err(err)],
        };
        Box::new(MemoryHistoryIterator {
            items: items.into_iter(),
        })
    }
}

/// Fabric-style transaction id: hex-encoded SHA-256 over the write sequence
/// number and the key.
fn transaction_id(counter: u64, key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(counter.to_be_bytes());
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

fn matches_selector(selector: &Selector, bytes: &[u8]) -> Result<bool, LedgerError> {
    match selector {
        Selector::All => Ok(true),
        Selector::FieldEq { field, value } => {
            let doc: Value = serde_json::from_slice(bytes)?;
            Ok(doc.get(field.wire_name()).and_then(Value::as_str) == Some(value.as_str()))
        }
    }
}

struct MemoryQueryIterator {
    items: std::vec::IntoIter<Result<(String, Vec<u8>), LedgerError>>,
}

impl Iterator for MemoryQueryIterator {
    type Item = Result<(String, Vec<u8>), LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl LedgerQueryIterator for MemoryQueryIterator {}

struct MemoryHistoryIterator {
    items: std::vec::IntoIter<Result<WriteRecord, LedgerError>>,
}

impl Iterator for MemoryHistoryIterator {
    type Item = Result<WriteRecord, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl LedgerHistoryIterator for MemoryHistoryIterator {}
