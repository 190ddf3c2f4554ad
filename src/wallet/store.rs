//! Wallet Store
//!
//! Point lookups, locked reads and atomic balance deltas over the
//! `wallets` table.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{Currency, Wallet};

/// Stateless store over the `wallets` table.
#[derive(Debug, Clone)]
pub struct WalletStore {
    pool: PgPool,
}

impl WalletStore {
    /// Create a new WalletStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a wallet by its unique name. Unlocked read, used for
    /// pre-transfer account resolution.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Wallet>, sqlx::Error> {
        let row: Option<(Uuid, String, Decimal, String)> = sqlx::query_as(
            r#"
            SELECT id, name, balance, currency
            FROM wallets
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, name, balance, currency)| Wallet {
            id,
            name,
            balance,
            currency: Currency::from(currency),
        }))
    }

    /// Fetch a wallet by id with an exclusive row lock scoped to `tx`.
    /// Concurrent lockers of the same row block until the transaction ends.
    pub async fn find_by_id_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Wallet>, sqlx::Error> {
        let row: Option<(Uuid, String, Decimal, String)> = sqlx::query_as(
            r#"
            SELECT id, name, balance, currency
            FROM wallets
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(|(id, name, balance, currency)| Wallet {
            id,
            name,
            balance,
            currency: Currency::from(currency),
        }))
    }

    /// Apply a signed delta to a wallet balance inside `tx`. The delta is
    /// applied in SQL relative to the stored value; the caller must hold
    /// the row lock from [`Self::find_by_id_for_update`] and must have
    /// verified sufficient funds, since the CHECK constraint rejects a
    /// negative result.
    pub async fn adjust_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        delta: Decimal,
    ) -> Result<(), sqlx::Error> {
        let rows = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Insert a wallet unless one with the same name already exists.
    /// Used by the bootstrap seeder; safe to run on every startup.
    pub async fn create_if_absent(
        &self,
        name: &str,
        balance: Decimal,
        currency: Currency,
    ) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            INSERT INTO wallets (id, name, balance, currency)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(balance)
        .bind(currency.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}
