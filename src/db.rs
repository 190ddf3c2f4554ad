//! Database module
//!
//! Schema bootstrap and seed data. The schema is created idempotently on
//! startup; re-running either step against an existing database is a no-op.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;

use crate::wallet::{Currency, WalletStore};

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Create the `wallets` and `ledger_entries` tables if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wallets (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            balance NUMERIC(10, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
            currency TEXT NOT NULL DEFAULT 'NGN',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ledger_entries (
            id UUID PRIMARY KEY,
            debit_wallet_id UUID NOT NULL REFERENCES wallets(id),
            credit_wallet_id UUID NOT NULL REFERENCES wallets(id),
            amount NUMERIC(10, 2) NOT NULL CHECK (amount > 0),
            status TEXT NOT NULL DEFAULT 'PENDING',
            idempotency_key TEXT NOT NULL UNIQUE,
            comment TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_ledger_entries_debit_wallet
        ON ledger_entries (debit_wallet_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_ledger_entries_credit_wallet
        ON ledger_entries (credit_wallet_id)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initial wallets, inserted once and skipped on every later startup.
const SEED_WALLETS: &[(&str, &str, Currency)] = &[
    ("WALLET_1", "1000000.00", Currency::Ngn),
    ("WALLET_2", "1000000.00", Currency::Ngn),
    ("WALLET_3", "1000.00", Currency::Usd),
    ("WALLET_4", "1000.00", Currency::Usd),
];

/// Seed the initial wallets if they don't exist.
pub async fn seed_wallets(pool: &PgPool) -> Result<(), sqlx::Error> {
    let store = WalletStore::new(pool.clone());

    for (name, balance, currency) in SEED_WALLETS {
        let balance = Decimal::from_str(balance).expect("Invalid seed balance constant");
        let created = store.create_if_absent(name, balance, *currency).await?;
        if created {
            tracing::info!(wallet = name, %balance, %currency, "Seeded wallet");
        }
    }

    Ok(())
}
