//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure. This is the
//! closed taxonomy the Transfer Coordinator surfaces; callers inspect the
//! kind, never a message string.

use thiserror::Error;

use super::AmountError;

/// Business rule violations and domain invariant failures raised while
/// processing a transfer. Independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Source wallet name did not resolve
    #[error("Source wallet '{0}' does not exist")]
    UnknownSourceWallet(String),

    /// Destination wallet name did not resolve
    #[error("Destination wallet '{0}' does not exist")]
    UnknownDestinationWallet(String),

    /// Debit and credit side resolve to the same wallet
    #[error("Cannot transfer to the same wallet")]
    SameWalletTransfer,

    /// Malformed request shape (missing fields, bad amount)
    #[error("Invalid transfer request: {0}")]
    Validation(String),

    /// Amount failed domain validation
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Debit wallet lacked funds at lock time
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    /// Another in-flight request created a ledger entry with this key
    /// between the dedup check and our insert
    #[error("Idempotency key conflict: {key}")]
    IdempotencyConflict { key: String },
}

impl TransferError {
    /// Check if this is a client error (user's fault, HTTP 4xx)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::IdempotencyConflict { .. })
    }

    /// Check if this is a transient conflict (retrying the request may help)
    pub fn is_conflict_error(&self) -> bool {
        matches!(self, Self::IdempotencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_funds_error() {
        let err = TransferError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        };

        assert!(err.is_client_error());
        assert!(!err.is_conflict_error());
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_unknown_wallet_errors() {
        let err = TransferError::UnknownSourceWallet("WALLET_X".to_string());
        assert!(err.is_client_error());
        assert!(err.to_string().contains("WALLET_X"));

        let err = TransferError::UnknownDestinationWallet("WALLET_Y".to_string());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_idempotency_conflict_error() {
        let err = TransferError::IdempotencyConflict {
            key: "k1".to_string(),
        };

        assert!(!err.is_client_error());
        assert!(err.is_conflict_error());
    }
}
