//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation to avoid the floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Russian ruble: the storefront's home currency.
    #[default]
    RUB,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "₽").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "\u{20bd}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "RUB" => Some(Currency::RUB),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency. Arithmetic is
/// fallible: currency mixing and overflow are reported as errors rather
/// than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a ruble amount, the storefront default.
    pub fn rub(amount_minor: i64) -> Self {
        Self::new(amount_minor, Currency::RUB)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    fn check_currency(&self, other: Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Add another amount of the same currency.
    pub fn try_add(self, other: Money) -> Result<Money, CommerceError> {
        self.check_currency(other)?;
        let amount = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another amount of the same currency.
    pub fn try_sub(self, other: Money) -> Result<Money, CommerceError> {
        self.check_currency(other)?;
        let amount = self
            .amount_minor
            .checked_sub(other.amount_minor)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract, flooring the result at zero in this currency.
    pub fn saturating_sub(self, other: Money) -> Result<Money, CommerceError> {
        let diff = self.try_sub(other)?;
        Ok(Money::new(diff.amount_minor.max(0), self.currency))
    }

    /// Multiply by a scalar.
    pub fn try_mul(self, factor: i64) -> Result<Money, CommerceError> {
        let amount = self
            .amount_minor
            .checked_mul(factor)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Calculate a percentage of this amount, rounded to the nearest
    /// minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount_minor as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Return the smaller of two same-currency amounts.
    pub fn min(self, other: Money) -> Money {
        if other.amount_minor < self.amount_minor {
            other
        } else {
            self
        }
    }

    /// Sum an iterator of same-currency amounts, starting from zero in
    /// `currency`.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(*m)?;
        }
        Ok(acc)
    }

    /// Format as a display string (e.g., "4999 ₽").
    pub fn display(&self) -> String {
        match self.currency {
            Currency::RUB => format!("{} {}", self.amount_minor, self.currency.symbol()),
            _ => format!("{}{}", self.currency.symbol(), self.amount_minor),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_addition() {
        let a = Money::rub(1000);
        let b = Money::rub(500);
        assert_eq!(a.try_add(b).unwrap(), Money::rub(1500));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let rub = Money::rub(1000);
        let usd = Money::new(1000, Currency::USD);
        assert!(matches!(
            rub.try_add(usd),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert!(rub.try_sub(usd).is_err());
    }

    #[test]
    fn test_money_overflow() {
        let a = Money::rub(i64::MAX);
        assert!(matches!(
            a.try_add(Money::rub(1)),
            Err(CommerceError::Overflow)
        ));
        assert!(matches!(a.try_mul(2), Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_money_saturating_sub() {
        let a = Money::rub(300);
        let b = Money::rub(1000);
        assert_eq!(a.saturating_sub(b).unwrap(), Money::rub(0));
        assert_eq!(b.saturating_sub(a).unwrap(), Money::rub(700));
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::rub(2500);
        assert_eq!(m.percentage(10.0), Money::rub(250));
    }

    #[test]
    fn test_money_percentage_rounds() {
        let m = Money::rub(999);
        // 10% of 999 is 99.9, rounds to 100.
        assert_eq!(m.percentage(10.0), Money::rub(100));
    }

    #[test]
    fn test_money_min() {
        assert_eq!(Money::rub(500).min(Money::rub(300)), Money::rub(300));
        assert_eq!(Money::rub(300).min(Money::rub(500)), Money::rub(300));
    }

    #[test]
    fn test_money_sum() {
        let amounts = [Money::rub(100), Money::rub(200), Money::rub(300)];
        let total = Money::try_sum(amounts.iter(), Currency::RUB).unwrap();
        assert_eq!(total, Money::rub(600));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::rub(4999).display(), "4999 \u{20bd}");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$4999");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("rub"), Some(Currency::RUB));
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
