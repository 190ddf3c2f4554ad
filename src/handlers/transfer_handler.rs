//! Transfer Handler
//!
//! The transfer-processing engine: idempotency deduplication, ledger-entry
//! lifecycle, and the atomic debit/credit under row-level locks.
//!
//! One call to [`TransferHandler::execute`] is one attempt to settle one
//! logical transfer:
//!
//! 1. Dedup: an existing ledger entry for the idempotency key short-circuits
//!    with that entry's recorded outcome, whatever its state.
//! 2. Resolve both wallet names; reject unknown wallets and self-transfers.
//! 3. Pre-write a `PENDING` ledger entry before touching any balance.
//! 4. Settle inside one transaction: lock both wallets in ascending-id
//!    order, re-check funds under the lock, apply both deltas, mark the
//!    entry `SUCCESSFUL`, commit.
//! 5. On any settlement error, mark the entry `FAILED` best-effort outside
//!    the aborted transaction and surface the original error.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Amount, TransferError};
use crate::error::AppError;
use crate::ledger::{LedgerStatus, LedgerStore, NewLedgerEntry};
use crate::wallet::{Wallet, WalletStore};

use super::{TransferCommand, TransferOutcome, TransferStatus};

/// Handler for wallet-to-wallet transfers
pub struct TransferHandler {
    wallets: WalletStore,
    ledger: LedgerStore,
    pool: PgPool,
}

impl TransferHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            wallets: WalletStore::new(pool.clone()),
            ledger: LedgerStore::new(pool.clone()),
            pool,
        }
    }

    /// Execute the transfer command
    pub async fn execute(&self, command: TransferCommand) -> Result<TransferOutcome, AppError> {
        // Step 1: idempotency check. A hit replays the recorded outcome
        // with no new ledger entry and no balance mutation.
        if let Some(existing) = self
            .ledger
            .find_by_idempotency_key(&command.idempotency_key)
            .await?
        {
            tracing::info!(
                idempotency_key = %command.idempotency_key,
                status = %existing.status,
                "Duplicate transfer request, replaying recorded outcome"
            );
            return Ok(TransferOutcome {
                ledger_entry_id: existing.id,
                status: TransferStatus::from(existing.status),
                message: replay_message(existing.status),
                duplicate: true,
            });
        }

        let amount: Amount = command.amount.parse().map_err(TransferError::from)?;

        // Step 2: account resolution via unlocked lookups.
        let debit_wallet = self
            .wallets
            .find_by_name(&command.from_account)
            .await?
            .ok_or_else(|| TransferError::UnknownSourceWallet(command.from_account.clone()))?;

        let credit_wallet = self
            .wallets
            .find_by_name(&command.to_account)
            .await?
            .ok_or_else(|| TransferError::UnknownDestinationWallet(command.to_account.clone()))?;

        if debit_wallet.id == credit_wallet.id {
            return Err(TransferError::SameWalletTransfer.into());
        }

        // Step 3: durable PENDING record before any balance is touched.
        // This is the anchor the dedup path returns on retry.
        let entry = self
            .ledger
            .create(NewLedgerEntry {
                debit_wallet_id: debit_wallet.id,
                credit_wallet_id: credit_wallet.id,
                amount,
                idempotency_key: command.idempotency_key.clone(),
                comment: command.comment.clone(),
            })
            .await?;

        // Step 4: atomic settlement; step 5: failure finalization.
        match self
            .settle(entry.id, debit_wallet.id, credit_wallet.id, amount)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    ledger_entry_id = %entry.id,
                    from = %command.from_account,
                    to = %command.to_account,
                    amount = %amount,
                    "Transfer settled"
                );
                Ok(TransferOutcome {
                    ledger_entry_id: entry.id,
                    status: TransferStatus::Success,
                    message: format!(
                        "Transfer of amount {} from {} to {} completed successfully.",
                        amount, command.from_account, command.to_account
                    ),
                    duplicate: false,
                })
            }
            Err(err) => {
                // The settlement transaction has already rolled back, so the
                // FAILED mark is a separate best-effort write. If it fails,
                // the entry stays PENDING for out-of-band reconciliation and
                // the original error still wins.
                match self.ledger.update_status(entry.id, LedgerStatus::Failed).await {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::warn!(
                            ledger_entry_id = %entry.id,
                            "Ledger entry no longer PENDING during failure finalization"
                        );
                    }
                    Err(mark_err) => {
                        tracing::error!(
                            ledger_entry_id = %entry.id,
                            error = %mark_err,
                            "Could not mark ledger entry FAILED, entry left PENDING for reconciliation"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    /// One transactional boundary around both balance mutations and the
    /// SUCCESSFUL mark. Dropping `tx` on any error path rolls everything
    /// back, leaving both balances bit-for-bit unchanged.
    async fn settle(
        &self,
        entry_id: Uuid,
        debit_wallet_id: Uuid,
        credit_wallet_id: Uuid,
        amount: Amount,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in ascending wallet-id order regardless of which
        // side is debit or credit, so concurrent A->B and B->A transfers
        // cannot circular-wait on each other.
        let (first_id, second_id) = if debit_wallet_id < credit_wallet_id {
            (debit_wallet_id, credit_wallet_id)
        } else {
            (credit_wallet_id, debit_wallet_id)
        };

        let first = self.lock_wallet(&mut tx, first_id).await?;
        let second = self.lock_wallet(&mut tx, second_id).await?;

        let debit_wallet = if first.id == debit_wallet_id {
            &first
        } else {
            &second
        };

        // The unlocked read in step 2 was advisory only; this is the
        // authoritative funds check.
        if debit_wallet.balance < amount.value() {
            return Err(TransferError::InsufficientFunds {
                required: amount.value(),
                available: debit_wallet.balance,
            }
            .into());
        }

        self.wallets
            .adjust_balance(&mut tx, debit_wallet_id, -amount.value())
            .await?;
        self.wallets
            .adjust_balance(&mut tx, credit_wallet_id, amount.value())
            .await?;

        self.ledger.mark_successful(&mut tx, entry_id).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn lock_wallet(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: Uuid,
    ) -> Result<Wallet, AppError> {
        self.wallets
            .find_by_id_for_update(tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Wallet {} vanished during settlement", id)))
    }
}

/// Message echoed back when a retry hits an already-recorded attempt.
fn replay_message(status: LedgerStatus) -> String {
    format!("Transfer {}.", status.to_string().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_message_per_status() {
        assert_eq!(replay_message(LedgerStatus::Successful), "Transfer successful.");
        assert_eq!(replay_message(LedgerStatus::Failed), "Transfer failed.");
        assert_eq!(replay_message(LedgerStatus::Pending), "Transfer pending.");
    }

    #[test]
    fn test_bad_amount_is_a_domain_error() {
        let err: TransferError = "0.50".parse::<Amount>().unwrap_err().into();
        assert!(err.is_client_error());
    }
}
