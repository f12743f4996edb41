use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A Transferable Development Right as stored on the ledger.
///
/// The serialized JSON document is the sole ledger representation of the
/// record; the camelCase field names are the wire names and stay stable
/// across versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tdr {
    /// Unique key; immutable after issuance
    pub id: String,

    /// Identity that issued the right; immutable
    pub issuer: String,

    /// Current holder; mutable only via transfer
    pub owner: String,

    /// Quantity represented; mutable only via update
    pub amount: f64,

    /// RFC 3339 timestamp assigned at issuance
    pub issue_date: String,

    /// Expiry; mutable via update
    pub valid_till: String,

    /// Monotonic false-to-true; set only by verification
    pub is_verified: bool,

    /// Monotonic true-to-false; set only by deactivation
    pub is_active: bool,

    /// Opaque external content reference, e.g. an ipfs:// link; immutable
    pub document_link: String,
}

impl Tdr {
    /// Serialize the record into its ledger representation.
    pub fn encode(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a stored ledger value back into a record.
    pub fn decode(bytes: &[u8]) -> Result<Self, LedgerError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
