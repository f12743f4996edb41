use crate::error::LedgerError;
use crate::ledger::{Ledger, Selector};
use crate::record::Tdr;

/// Executes selector queries against the ledger's secondary index.
///
/// Read-only; bypasses the lifecycle controller and sees the transaction's
/// read snapshot.
pub struct QueryEngine<'a> {
    ledger: &'a dyn Ledger,
}

impl<'a> QueryEngine<'a> {
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self { ledger }
    }

    /// Run `selector` and decode every match. Result ordering is whatever
    /// the underlying index yields. A decode failure on any matched value
    /// aborts the whole query.
    pub fn query(&self, selector: &Selector) -> Result<Vec<Tdr>, LedgerError> {
        let mut records = Vec::new();
        for item in self.ledger.query(selector) {
            let (_, bytes) = item?;
            records.push(Tdr::decode(&bytes)?);
        }
        Ok(records)
    }

    /// All records in the key space.
    pub fn all(&self) -> Result<Vec<Tdr>, LedgerError> {
        self.query(&Selector::all())
    }

    /// All records currently held by `owner`.
    pub fn owned_by(&self, owner: &str) -> Result<Vec<Tdr>, LedgerError> {
        self.query(&Selector::owned_by(owner))
    }
}
