use chrono::Utc;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Tdr;
use crate::store::EntityStore;

/// Enforces the legal state transitions of a TDR record.
///
/// Every operation is a strict read-validate-write cycle against a single
/// key through the entity store. Atomicity across the read and the write
/// belongs to the enclosing transaction boundary; under the platform's
/// optimistic concurrency control a conflicting writer causes the whole
/// transaction to be rejected at commit time.
pub struct LifecycleController<'a> {
    store: EntityStore<'a>,
}

impl<'a> LifecycleController<'a> {
    pub fn new(ledger: &'a dyn Ledger) -> Self {
        Self {
            store: EntityStore::new(ledger),
        }
    }

    /// Issue a new TDR. The issue date is assigned here; the record starts
    /// unverified and active.
    ///
    /// No existence check is made: issuing over an existing id replaces the
    /// current version, and the earlier versions remain in the change log.
    pub fn issue(
        &self,
        id: &str,
        issuer: &str,
        owner: &str,
        amount: f64,
        valid_till: &str,
        document_link: &str,
    ) -> Result<(), LedgerError> {
        let record = Tdr {
            id: id.to_string(),
            issuer: issuer.to_string(),
            owner: owner.to_string(),
            amount,
            issue_date: Utc::now().to_rfc3339(),
            valid_till: valid_till.to_string(),
            is_verified: false,
            is_active: true,
            document_link: document_link.to_string(),
        };
        log::debug!("issuing TDR {} to {}", id, owner);
        self.store.put(&record)
    }

    /// Transfer ownership of the record to `new_owner`.
    pub fn transfer(&self, id: &str, new_owner: &str) -> Result<(), LedgerError> {
        let mut record = self.read_existing(id)?;
        record.owner = new_owner.to_string();
        log::debug!("transferring TDR {} to {}", id, new_owner);
        self.store.put(&record)
    }

    /// Mark the record as verified. Idempotent; verification is never
    /// revoked by any operation.
    pub fn verify(&self, id: &str) -> Result<(), LedgerError> {
        let mut record = self.read_existing(id)?;
        record.is_verified = true;
        log::debug!("verifying TDR {}", id);
        self.store.put(&record)
    }

    /// Overwrite the record's amount and expiry. No bounds check happens at
    /// this layer; the boundary above the core owns input validation.
    pub fn update(
        &self,
        id: &str,
        new_amount: f64,
        new_valid_till: &str,
    ) -> Result<(), LedgerError> {
        let mut record = self.read_existing(id)?;
        record.amount = new_amount;
        record.valid_till = new_valid_till.to_string();
        log::debug!("updating TDR {}", id);
        self.store.put(&record)
    }

    /// Deactivate the record. This is a soft terminal state: the record
    /// stays readable and keeps its history, and no exposed operation sets
    /// `is_active` back to true.
    pub fn destroy(&self, id: &str) -> Result<(), LedgerError> {
        let mut record = self.read_existing(id)?;
        record.is_active = false;
        log::info!("TDR {} deactivated", id);
        self.store.put(&record)
    }

    /// Fetch the current record for `id`.
    pub fn get_details(&self, id: &str) -> Result<Tdr, LedgerError> {
        self.read_existing(id)
    }

    fn read_existing(&self, id: &str) -> Result<Tdr, LedgerError> {
        self.store
            .get(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLedger;
    use chrono::DateTime;

    fn issue_sample(lc: &LifecycleController<'_>) {
        lc.issue("tdr-1", "CityA", "Alice", 100.0, "2030-01-01", "ipfs://doc1")
            .unwrap();
    }

    #[test]
    fn issue_sets_initial_state() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        let record = lc.get_details("tdr-1").unwrap();
        assert_eq!(record.id, "tdr-1");
        assert_eq!(record.issuer, "CityA");
        assert_eq!(record.owner, "Alice");
        assert_eq!(record.amount, 100.0);
        assert_eq!(record.valid_till, "2030-01-01");
        assert_eq!(record.document_link, "ipfs://doc1");
        assert!(!record.is_verified);
        assert!(record.is_active);
        assert!(DateTime::parse_from_rfc3339(&record.issue_date).is_ok());
    }

    #[test]
    fn transfer_updates_only_owner() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        let before = lc.get_details("tdr-1").unwrap();
        lc.transfer("tdr-1", "Bob").unwrap();
        let after = lc.get_details("tdr-1").unwrap();

        assert_eq!(after.owner, "Bob");
        let mut expected = before;
        expected.owner = "Bob".to_string();
        assert_eq!(after, expected);
    }

    #[test]
    fn verify_is_monotonic_and_idempotent() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        lc.verify("tdr-1").unwrap();
        let once = lc.get_details("tdr-1").unwrap();
        assert!(once.is_verified);

        lc.verify("tdr-1").unwrap();
        let twice = lc.get_details("tdr-1").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_overwrites_amount_and_valid_till() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        lc.update("tdr-1", 250.5, "2035-06-30").unwrap();
        let record = lc.get_details("tdr-1").unwrap();
        assert_eq!(record.amount, 250.5);
        assert_eq!(record.valid_till, "2035-06-30");
        assert_eq!(record.owner, "Alice");
    }

    #[test]
    fn update_does_not_enforce_amount_bounds() {
        // The amount >= 0 invariant is advisory at this layer.
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        lc.update("tdr-1", -5.0, "2030-01-01").unwrap();
        assert_eq!(lc.get_details("tdr-1").unwrap().amount, -5.0);
    }

    #[test]
    fn destroy_is_terminal_but_record_stays_readable() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);

        lc.destroy("tdr-1").unwrap();
        let record = lc.get_details("tdr-1").unwrap();
        assert!(!record.is_active);

        // No exposed operation flips is_active back.
        lc.transfer("tdr-1", "Bob").unwrap();
        lc.verify("tdr-1").unwrap();
        lc.update("tdr-1", 1.0, "2031-01-01").unwrap();
        assert!(!lc.get_details("tdr-1").unwrap().is_active);
    }

    #[test]
    fn mutations_on_absent_id_fail_with_not_found() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);

        assert!(matches!(
            lc.transfer("nope", "Bob"),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(lc.verify("nope"), Err(LedgerError::NotFound(_))));
        assert!(matches!(
            lc.update("nope", 1.0, "2031-01-01"),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(lc.destroy("nope"), Err(LedgerError::NotFound(_))));
        assert!(matches!(
            lc.get_details("nope"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn reissue_replaces_the_current_version() {
        let ledger = MemoryLedger::new();
        let lc = LifecycleController::new(&ledger);
        issue_sample(&lc);
        lc.verify("tdr-1").unwrap();

        lc.issue("tdr-1", "CityB", "Carol", 42.0, "2040-01-01", "ipfs://doc2")
            .unwrap();
        let record = lc.get_details("tdr-1").unwrap();
        assert_eq!(record.issuer, "CityB");
        assert_eq!(record.owner, "Carol");
        assert!(!record.is_verified);
    }
}
