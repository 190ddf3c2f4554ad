//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::LedgerStatus;

/// Command to move funds between two named wallets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Name of the wallet being debited
    pub from_account: String,
    /// Name of the wallet being credited
    pub to_account: String,
    /// Amount to transfer (as string for precise decimal)
    pub amount: String,
    /// Caller-supplied token guaranteeing at-most-one effective execution
    pub idempotency_key: String,
    /// Optional free-text annotation recorded on the ledger entry
    pub comment: Option<String>,
}

impl TransferCommand {
    pub fn new(
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        amount: impl Into<String>,
        idempotency_key: impl Into<String>,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            to_account: to_account.into(),
            amount: amount.into(),
            idempotency_key: idempotency_key.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: String) -> Self {
        self.comment = Some(comment);
        self
    }
}

/// Caller-visible transfer status, mirroring the ledger entry's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Success,
    Failed,
    Pending,
}

impl From<LedgerStatus> for TransferStatus {
    fn from(status: LedgerStatus) -> Self {
        match status {
            LedgerStatus::Successful => TransferStatus::Success,
            LedgerStatus::Failed => TransferStatus::Failed,
            LedgerStatus::Pending => TransferStatus::Pending,
        }
    }
}

/// Outcome of a transfer attempt (fresh or replayed via idempotency key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub ledger_entry_id: Uuid,
    pub status: TransferStatus,
    pub message: String,
    /// True when this outcome replays a previously recorded attempt
    pub duplicate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_command_builder() {
        let cmd = TransferCommand::new("WALLET_1", "WALLET_2", "100.00", "key-1")
            .with_comment("Rent".to_string());

        assert_eq!(cmd.from_account, "WALLET_1");
        assert_eq!(cmd.amount, "100.00");
        assert_eq!(cmd.comment, Some("Rent".to_string()));
    }

    #[test]
    fn test_transfer_status_from_ledger_status() {
        assert_eq!(
            TransferStatus::from(LedgerStatus::Successful),
            TransferStatus::Success
        );
        assert_eq!(
            TransferStatus::from(LedgerStatus::Failed),
            TransferStatus::Failed
        );
        assert_eq!(
            TransferStatus::from(LedgerStatus::Pending),
            TransferStatus::Pending
        );
    }

    #[test]
    fn test_transfer_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransferStatus::Success).unwrap(),
            "\"success\""
        );
        assert_eq!(
            serde_json::to_string(&TransferStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
