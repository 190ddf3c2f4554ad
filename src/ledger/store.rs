//! Ledger Store
//!
//! Create, look up and finalize transfer attempt records. The unique index
//! on `idempotency_key` is what makes the dedup guarantee hold under
//! concurrent duplicate requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{LedgerEntry, LedgerStatus};
use crate::domain::Amount;

/// Fields for a new ledger entry. Status is not a field: every entry
/// starts as `PENDING` regardless of caller intent.
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub debit_wallet_id: Uuid,
    pub credit_wallet_id: Uuid,
    pub amount: Amount,
    pub idempotency_key: String,
    pub comment: Option<String>,
}

/// Ledger Store Error
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Ledger entry already exists for idempotency key {0}")]
    DuplicateIdempotencyKey(String),
}

/// Stateless store over the `ledger_entries` table.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    pool: PgPool,
}

type LedgerRow = (
    Uuid,
    Uuid,
    Uuid,
    Decimal,
    String,
    String,
    Option<String>,
    DateTime<Utc>,
);

fn entry_from_row(row: LedgerRow) -> LedgerEntry {
    let (id, debit_wallet_id, credit_wallet_id, amount, status, idempotency_key, comment, created_at) =
        row;
    LedgerEntry {
        id,
        debit_wallet_id,
        credit_wallet_id,
        amount,
        status: LedgerStatus::from(status),
        idempotency_key,
        comment,
        created_at,
    }
}

impl LedgerStore {
    /// Create a new LedgerStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new `PENDING` entry. A unique violation on the idempotency
    /// key means another request for the same logical transfer won the
    /// race; that surfaces as `DuplicateIdempotencyKey`.
    pub async fn create(&self, entry: NewLedgerEntry) -> Result<LedgerEntry, LedgerStoreError> {
        let row: LedgerRow = sqlx::query_as(
            r#"
            INSERT INTO ledger_entries (
                id, debit_wallet_id, credit_wallet_id, amount,
                status, idempotency_key, comment
            )
            VALUES ($1, $2, $3, $4, 'PENDING', $5, $6)
            RETURNING id, debit_wallet_id, credit_wallet_id, amount,
                      status, idempotency_key, comment, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.debit_wallet_id)
        .bind(entry.credit_wallet_id)
        .bind(entry.amount.value())
        .bind(&entry.idempotency_key)
        .bind(&entry.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                LedgerStoreError::DuplicateIdempotencyKey(entry.idempotency_key.clone())
            }
            other => LedgerStoreError::Database(other),
        })?;

        Ok(entry_from_row(row))
    }

    /// Point lookup by idempotency key. Unlocked; this is the dedup path.
    pub async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<LedgerEntry>, LedgerStoreError> {
        let row: Option<LedgerRow> = sqlx::query_as(
            r#"
            SELECT id, debit_wallet_id, credit_wallet_id, amount,
                   status, idempotency_key, comment, created_at
            FROM ledger_entries
            WHERE idempotency_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(entry_from_row))
    }

    /// Set a terminal status on a still-`PENDING` entry. Returns `false`
    /// when nothing was updated, i.e. the entry is missing or already
    /// terminal; a terminal status is never overwritten.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: LedgerStatus,
    ) -> Result<bool, LedgerStoreError> {
        let rows = sqlx::query(
            r#"
            UPDATE ledger_entries
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    /// Same transition as [`Self::update_status`], but executed inside the
    /// settlement transaction so the `SUCCESSFUL` mark commits atomically
    /// with the balance mutation.
    pub async fn mark_successful(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<(), LedgerStoreError> {
        let rows = sqlx::query(
            r#"
            UPDATE ledger_entries
            SET status = 'SUCCESSFUL', updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(LedgerStoreError::Database(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}
