//! Common test utilities

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use wallet_ledger::db;
use wallet_ledger::wallet::{Currency, WalletStore};

/// Connect to the test database and make sure the schema exists.
/// Returns `None` (and the caller should skip) when DATABASE_URL is unset.
pub async fn try_setup_test_db() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database-backed test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    db::ensure_schema(&pool).await.expect("Failed to ensure schema");

    Some(pool)
}

/// Create a wallet with a unique name so tests don't interfere.
/// Returns the generated name.
pub async fn create_wallet(pool: &PgPool, prefix: &str, balance: Decimal) -> String {
    let name = format!("{}_{}", prefix, Uuid::new_v4().simple());
    let store = WalletStore::new(pool.clone());
    let created = store
        .create_if_absent(&name, balance, Currency::Ngn)
        .await
        .expect("Failed to create test wallet");
    assert!(created, "test wallet name collided");
    name
}

/// Current balance of a wallet, by name.
pub async fn wallet_balance(pool: &PgPool, name: &str) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM wallets WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to read wallet balance")
}

/// Number of ledger entries recorded for an idempotency key.
pub async fn ledger_count(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entries WHERE idempotency_key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .expect("Failed to count ledger entries")
}

/// Persisted status of the ledger entry for an idempotency key, if any.
pub async fn ledger_status(pool: &PgPool, key: &str) -> Option<String> {
    sqlx::query_scalar("SELECT status FROM ledger_entries WHERE idempotency_key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await
        .expect("Failed to read ledger status")
}
