use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Tdr;

/// Pass-through access to the ledger key space for TDR records.
///
/// This layer only moves bytes through the record codec; existence
/// semantics are decided by callers, and storage errors propagate
/// unchanged with no retries.
pub struct EntityStore<'a> {
    ledger: &'a dyn Ledger,
}

impl<'a> EntityStore<'a> {
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self { ledger }
    }

    /// Fetch and decode the current record under `id`, if any.
    pub fn get(&self, id: &str) -> Result<Option<Tdr>, LedgerError> {
        match self.ledger.get(id)? {
            Some(bytes) => Ok(Some(Tdr::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode `record` and persist it as the current version under its id.
    pub fn put(&self, record: &Tdr) -> Result<(), LedgerError> {
        self.ledger.put(&record.id, &record.encode()?)
    }
}
