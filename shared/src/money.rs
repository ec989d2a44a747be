//! Money — exact minor-unit arithmetic
//!
//! Amounts are integer minor units (cents, rappen) paired with an ISO 4217
//! currency code. Multiplication runs through `Decimal` and rounds back to an
//! integer with `MidpointAwayFromZero` (round half up for positive values);
//! commission and surcharge totals depend on this rounding rule.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Immutable monetary value. Every operation returns a new `Money`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in integer minor units
    pub amount: i64,
    /// ISO 4217 currency code (e.g. "EUR", "CHF")
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(0, currency)
    }

    pub fn is_same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    fn require_same_currency(&self, other: &Money) -> PricingResult<()> {
        if !self.is_same_currency(other) {
            return Err(PricingError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }

    /// Add two amounts of the same currency
    pub fn add(&self, other: &Money) -> PricingResult<Money> {
        self.require_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    /// Subtract an amount of the same currency
    pub fn subtract(&self, other: &Money) -> PricingResult<Money> {
        self.require_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, &self.currency))
    }

    /// Multiply by an exact decimal factor, rounding to the nearest minor unit
    pub fn multiply(&self, factor: Decimal) -> Money {
        let product = Decimal::from(self.amount) * factor;
        Money::new(round_to_minor_units(product), &self.currency)
    }

    /// `amount × percentage / 100`, sign-preserving
    pub fn percentage(&self, percentage: Decimal) -> Money {
        let product = Decimal::from(self.amount) * percentage / Decimal::ONE_HUNDRED;
        Money::new(round_to_minor_units(product), &self.currency)
    }
}

/// Round to zero decimal places, midpoint away from zero
fn round_to_minor_units(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_currency() {
        let a = Money::new(1000, "EUR");
        let b = Money::new(250, "EUR");
        assert_eq!(a.add(&b).unwrap(), Money::new(1250, "EUR"));
    }

    #[test]
    fn test_add_currency_mismatch() {
        let a = Money::new(1000, "EUR");
        let b = Money::new(250, "USD");
        assert_eq!(
            a.add(&b),
            Err(PricingError::CurrencyMismatch {
                left: "EUR".to_string(),
                right: "USD".to_string(),
            })
        );
    }

    #[test]
    fn test_subtract() {
        let a = Money::new(1000, "EUR");
        let b = Money::new(250, "EUR");
        assert_eq!(a.subtract(&b).unwrap(), Money::new(750, "EUR"));
    }

    #[test]
    fn test_multiply_integer_factor() {
        let m = Money::new(1000, "EUR");
        assert_eq!(m.multiply(Decimal::from(3)), Money::new(3000, "EUR"));
    }

    #[test]
    fn test_multiply_fractional_factor() {
        // 3.5 hours at 300 minor units per hour
        let m = Money::new(300, "CHF");
        let factor = Decimal::new(35, 1); // 3.5
        assert_eq!(m.multiply(factor), Money::new(1050, "CHF"));
    }

    #[test]
    fn test_multiply_rounds_half_up() {
        // 25 * 0.5 = 12.5 -> 13
        let m = Money::new(25, "EUR");
        assert_eq!(m.multiply(Decimal::new(5, 1)).amount, 13);
        // 24 * 0.5 = 12 exactly
        let m = Money::new(24, "EUR");
        assert_eq!(m.multiply(Decimal::new(5, 1)).amount, 12);
    }

    #[test]
    fn test_percentage() {
        let m = Money::new(1000, "EUR");
        assert_eq!(m.percentage(Decimal::from(10)), Money::new(100, "EUR"));
    }

    #[test]
    fn test_percentage_negative_preserves_sign() {
        let m = Money::new(1000, "EUR");
        assert_eq!(m.percentage(Decimal::from(-10)), Money::new(-100, "EUR"));
    }

    #[test]
    fn test_percentage_rounds_midpoint_away_from_zero() {
        // 5% of 50 = 2.5 -> 3
        let m = Money::new(50, "EUR");
        assert_eq!(m.percentage(Decimal::from(5)).amount, 3);
        // -5% of 50 = -2.5 -> -3
        assert_eq!(m.percentage(Decimal::from(-5)).amount, -3);
    }

    #[test]
    fn test_percentage_zero() {
        let m = Money::new(3000, "EUR");
        assert_eq!(m.percentage(Decimal::ZERO), Money::new(0, "EUR"));
    }

    #[test]
    fn test_serde_round_trip() {
        let m = Money::new(1500, "USD");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"amount":1500,"currency":"USD"}"#);
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
