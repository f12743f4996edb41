use crate::error::LedgerError;
use crate::history::{HistoryEntry, HistoryTracker};
use crate::ledger::Ledger;
use crate::lifecycle::LifecycleController;
use crate::query::QueryEngine;
use crate::record::Tdr;

/// The operation surface the core exposes to its transaction runtime.
///
/// Mutating calls round-trip through the lifecycle controller; query and
/// history calls are read-only and bypass it. Each method is expected to run
/// inside one externally supplied transaction boundary.
pub struct TdrContract<L: Ledger> {
    ledger: L,
}

impl<L: Ledger> TdrContract<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// The underlying ledger handle.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn lifecycle(&self) -> LifecycleController<'_> {
        LifecycleController::new(&self.ledger)
    }

    /// Issue a new TDR.
    pub fn issue(
        &self,
        id: &str,
        issuer: &str,
        owner: &str,
        amount: f64,
        valid_till: &str,
        document_link: &str,
    ) -> Result<(), LedgerError> {
        self.lifecycle()
            .issue(id, issuer, owner, amount, valid_till, document_link)
    }

    /// Transfer ownership of a TDR to a new owner.
    pub fn transfer(&self, id: &str, new_owner: &str) -> Result<(), LedgerError> {
        self.lifecycle().transfer(id, new_owner)
    }

    /// Mark a TDR as verified.
    pub fn verify(&self, id: &str) -> Result<(), LedgerError> {
        self.lifecycle().verify(id)
    }

    /// Overwrite a TDR's amount and expiry.
    pub fn update(
        &self,
        id: &str,
        new_amount: f64,
        new_valid_till: &str,
    ) -> Result<(), LedgerError> {
        self.lifecycle().update(id, new_amount, new_valid_till)
    }

    /// Deactivate a TDR.
    pub fn destroy(&self, id: &str) -> Result<(), LedgerError> {
        self.lifecycle().destroy(id)
    }

    /// Fetch the current record for an id.
    pub fn get_details(&self, id: &str) -> Result<Tdr, LedgerError> {
        self.lifecycle().get_details(id)
    }

    /// All TDRs currently held by `owner`.
    pub fn get_all_by_owner(&self, owner: &str) -> Result<Vec<Tdr>, LedgerError> {
        QueryEngine::new(&self.ledger).owned_by(owner)
    }

    /// Every TDR in the key space.
    pub fn get_all(&self) -> Result<Vec<Tdr>, LedgerError> {
        QueryEngine::new(&self.ledger).all()
    }

    /// The full audit trail for an id, oldest write first.
    pub fn get_history(&self, id: &str) -> Result<Vec<HistoryEntry>, LedgerError> {
        HistoryTracker::new(&self.ledger).history(id)
    }
}
