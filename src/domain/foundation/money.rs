//! Money value object backed by an exact decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::ValidationError;

/// A non-negative monetary amount in the store's single currency.
///
/// Arithmetic saturates at the largest representable amount instead of
/// panicking; the `checked_*` forms report overflow as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount, rejecting negative values.
    pub fn try_new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::invalid_format(
                "price",
                format!("amount must not be negative, got {}", amount),
            ));
        }
        Ok(Self(amount))
    }

    /// Creates an amount from integer cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(cents), 2))
    }

    /// Returns the zero amount.
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the inner decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiplies a unit price by a quantity.
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    pub fn checked_times(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Returns true for an amount of exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_negative_amounts() {
        assert!(Money::try_new(dec!(-0.01)).is_err());
        assert!(Money::try_new(dec!(0)).is_ok());
    }

    #[test]
    fn times_multiplies_exactly() {
        let price = Money::try_new(dec!(3.50)).unwrap();
        assert_eq!(price.times(3).amount(), dec!(10.50));
    }

    #[test]
    fn from_cents_keeps_large_values() {
        assert_eq!(Money::from_cents(u64::MAX).amount(), dec!(184467440737095516.15));
    }

    #[test]
    fn overflowing_arithmetic_saturates_or_reports() {
        let huge = Money::try_new(Decimal::MAX).unwrap();

        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Money::from_cents(1)), None);
        assert_eq!(huge.times(2), huge);
        assert_eq!(huge + huge, huge);
        assert_eq!(
            Money::from_cents(150).checked_add(Money::from_cents(50)),
            Some(Money::from_cents(200))
        );
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Money = [Money::from_cents(350), Money::from_cents(200)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), dec!(5.50));
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::try_new(dec!(5.5)).unwrap().to_string(), "$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn deserializes_from_json_number() {
        let money: Money = serde_json::from_str("2.99").unwrap();
        assert_eq!(money.amount(), dec!(2.99));
    }

    #[test]
    fn deserialization_rejects_negative_number() {
        assert!(serde_json::from_str::<Money>("-1").is_err());
    }
}
