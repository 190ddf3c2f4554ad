//! Ledger module
//!
//! Append-only record of every transfer attempt. Entries are created as
//! `PENDING` before any balance is touched and move exactly once to a
//! terminal state; they are never deleted.

mod store;

pub use store::{LedgerStore, LedgerStoreError, NewLedgerEntry};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ledger entry status: a one-way state machine
/// `PENDING -> {SUCCESSFUL, FAILED}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LedgerStatus {
    Pending,
    Successful,
    Failed,
}

impl LedgerStatus {
    /// Terminal statuses never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LedgerStatus::Successful | LedgerStatus::Failed)
    }
}

impl From<String> for LedgerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SUCCESSFUL" => LedgerStatus::Successful,
            "FAILED" => LedgerStatus::Failed,
            _ => LedgerStatus::Pending,
        }
    }
}

impl std::fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerStatus::Pending => write!(f, "PENDING"),
            LedgerStatus::Successful => write!(f, "SUCCESSFUL"),
            LedgerStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// One transfer attempt, as persisted. Immutable after settlement except
/// for the single status transition.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub debit_wallet_id: Uuid,
    pub credit_wallet_id: Uuid,
    pub amount: Decimal,
    pub status: LedgerStatus,
    pub idempotency_key: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_status_from_string() {
        assert_eq!(
            LedgerStatus::from("PENDING".to_string()),
            LedgerStatus::Pending
        );
        assert_eq!(
            LedgerStatus::from("SUCCESSFUL".to_string()),
            LedgerStatus::Successful
        );
        assert_eq!(
            LedgerStatus::from("FAILED".to_string()),
            LedgerStatus::Failed
        );
        assert_eq!(
            LedgerStatus::from("unknown".to_string()),
            LedgerStatus::Pending
        );
    }

    #[test]
    fn test_ledger_status_display() {
        assert_eq!(LedgerStatus::Pending.to_string(), "PENDING");
        assert_eq!(LedgerStatus::Successful.to_string(), "SUCCESSFUL");
        assert_eq!(LedgerStatus::Failed.to_string(), "FAILED");
    }

    #[test]
    fn test_ledger_status_terminality() {
        assert!(!LedgerStatus::Pending.is_terminal());
        assert!(LedgerStatus::Successful.is_terminal());
        assert!(LedgerStatus::Failed.is_terminal());
    }
}
