//! Interest accrual
//!
//! Pure daily-interest calculation over wallet balances. No persistence or
//! concurrency concerns here; callers apply the result however they like.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Annual interest rate: 27.5%
const ANNUAL_RATE: Decimal = Decimal::from_parts(275, 0, 0, false, 3);

/// Interest for a single day on the given balance.
///
/// Formula: `(balance * annual_rate) / days_in_year`, leap-year aware.
pub fn calculate_daily_interest(balance: Decimal, date: NaiveDate) -> Decimal {
    use chrono::Datelike;

    let days_in_year = if is_leap_year(date.year()) {
        Decimal::from(366)
    } else {
        Decimal::from(365)
    };

    let daily_rate = ANNUAL_RATE / days_in_year;

    balance * daily_rate
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_interest_non_leap_year() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let interest = calculate_daily_interest(dec!(10000.00), date);

        // (10000 * 0.275) / 365 = 7.534246575...
        assert_eq!(interest.round_dp(4), dec!(7.5342));
    }

    #[test]
    fn test_daily_interest_leap_year() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let interest = calculate_daily_interest(dec!(10000.00), date);

        // (10000 * 0.275) / 366 = 7.513661202...
        assert_eq!(interest.round_dp(4), dec!(7.5137));
    }

    #[test]
    fn test_interest_addition_keeps_precision() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let balance = dec!(100.00);
        let interest = calculate_daily_interest(balance, date);
        let new_balance = balance + interest;

        // (100 * 0.275) / 365 = 0.0753424657534246575...
        assert!(new_balance > dec!(100.0753));
        assert!(new_balance < dec!(100.0754));
        assert_eq!(new_balance.round_dp(6), dec!(100.075342));
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2000)); // century leap
        assert!(!is_leap_year(2100)); // century non-leap
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
    }
}
