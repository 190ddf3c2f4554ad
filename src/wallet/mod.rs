//! Wallet module
//!
//! Named wallets holding exact decimal balances, and the store that reads
//! and mutates them. Balances are only ever written by the Transfer
//! Coordinator through [`WalletStore::adjust_balance`].

mod store;

pub use store::WalletStore;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported wallet currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ngn,
    Usd,
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        match s.as_str() {
            "USD" => Currency::Usd,
            _ => Currency::Ngn,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Ngn => write!(f, "NGN"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// A named wallet. `name` is the client-facing lookup key; `balance` is
/// exact NUMERIC(10,2), never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub id: Uuid,
    pub name: String,
    pub balance: Decimal,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_string() {
        assert_eq!(Currency::from("NGN".to_string()), Currency::Ngn);
        assert_eq!(Currency::from("USD".to_string()), Currency::Usd);
        // Unknown values fall back to the default currency
        assert_eq!(Currency::from("GBP".to_string()), Currency::Ngn);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Ngn.to_string(), "NGN");
        assert_eq!(Currency::Usd.to_string(), "USD");
    }
}
