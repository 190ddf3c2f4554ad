//! Amount type
//!
//! Domain primitive for transfer amounts with business rule validation.
//! Amounts are validated at construction time, so an invalid amount can
//! never reach the ledger or the balance mutation path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest transferable amount.
const MIN_AMOUNT: &str = "1";

/// Ceiling imposed by the NUMERIC(10,2) column: 8 integer digits.
const MAX_AMOUNT: &str = "100000000";

/// Balances carry exactly 2 fractional digits.
const MAX_SCALE: u32 = 2;

/// Amount represents a validated transfer amount.
///
/// # Invariants
/// - Value is at least 1.00
/// - At most 2 decimal places
/// - Fits a NUMERIC(10,2) column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be at least {MIN_AMOUNT} (got {0})")]
    BelowMinimum(Decimal),

    #[error("Amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount exceeds the maximum representable value")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::BelowMinimum` if value < 1
    /// - `AmountError::TooManyDecimals` if more than 2 decimal places
    /// - `AmountError::Overflow` if the value does not fit NUMERIC(10,2)
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let min = Decimal::from_str(MIN_AMOUNT).expect("Invalid MIN_AMOUNT constant");
        if value < min {
            return Err(AmountError::BelowMinimum(value));
        }

        if value.scale() > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(value.scale()));
        }

        let max = Decimal::from_str(MAX_AMOUNT).expect("Invalid MAX_AMOUNT constant");
        if value >= max {
            return Err(AmountError::Overflow);
        }

        Ok(Self(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
