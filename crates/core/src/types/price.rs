//! Type-safe price representation using decimal arithmetic.
//!
//! The cafe trades in a single currency, so a `Price` is just a non-negative
//! decimal amount. Formatting always uses two decimal places (e.g. `$3.50`).

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Error returned when constructing a `Price` from an invalid amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Panics
    ///
    /// Panics if `cents` is negative. In a `const` or `static` initializer
    /// this is a compile error, so a mistyped catalog price cannot ship.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn from_cents(cents: i64) -> Self {
        assert!(cents >= 0, "price in cents must not be negative");
        Self(Decimal::from_parts(
            (cents as u64 & 0xFFFF_FFFF) as u32,
            (cents as u64 >> 32) as u32,
            0,
            false,
            2,
        ))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// Price of `quantity` units, or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: Quantity) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity.get())).map(Self)
    }

    /// Sum of two prices, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Scale by a non-negative rate and round to whole cents, saturating at
    /// `Decimal::MAX`.
    ///
    /// Midpoints round away from zero, matching conventional till rounding.
    #[must_use]
    pub fn scaled_to_cents(self, rate: Decimal) -> Self {
        Self(round_cents(self.0.saturating_mul(rate.abs())))
    }

    /// Like [`Price::scaled_to_cents`], or `None` on overflow.
    #[must_use]
    pub fn checked_scaled_to_cents(self, rate: Decimal) -> Option<Self> {
        self.0.checked_mul(rate.abs()).map(|scaled| Self(round_cents(scaled)))
    }

    /// The amount rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_cents(self.0)
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.rounded())
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at `Decimal::MAX`; use [`Price::checked_add`] to detect it.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(350).amount(), Decimal::new(350, 2));
        assert_eq!(Price::from_cents(0), Price::ZERO);
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn test_from_cents_rejects_negative() {
        let _ = Price::from_cents(-5);
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(499, 2)).is_ok());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(350).to_string(), "$3.50");
        assert_eq!(Price::from_cents(1100).to_string(), "$11.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!(Price::new(Decimal::new(1005, 3)).unwrap().to_string(), "$1.01");
    }

    #[test]
    fn test_times_quantity() {
        let qty = Quantity::new(3).unwrap();
        assert_eq!(Price::from_cents(500).times(qty), Price::from_cents(1500));
    }

    #[test]
    fn test_scaled_to_cents_rounds_half_away_from_zero() {
        let rate = Decimal::new(8, 2);
        assert_eq!(
            Price::from_cents(1050).scaled_to_cents(rate),
            Price::from_cents(84)
        );
        // 0.5625 * 0.08 = 0.045 -> 0.05
        let amount = Price::new(Decimal::new(5625, 4)).unwrap();
        assert_eq!(amount.scaled_to_cents(rate), Price::from_cents(5));
    }

    #[test]
    fn test_checked_arithmetic_detects_overflow() {
        let huge = Price::new(Decimal::MAX).unwrap();
        let two = Quantity::new(2).unwrap();

        assert_eq!(huge.checked_times(two), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(huge.times(two), huge);
        assert_eq!(huge + huge, huge);

        assert_eq!(
            Price::from_cents(350).checked_times(two),
            Some(Price::from_cents(700))
        );
        assert_eq!(
            Price::from_cents(1050).checked_scaled_to_cents(Decimal::new(8, 2)),
            Some(Price::from_cents(84))
        );
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(350), Price::from_cents(700)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(1050));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("\"-1.00\"").is_err());
        let price: Price = serde_json::from_str("\"3.50\"").unwrap();
        assert_eq!(price, Price::from_cents(350));

        let price: Price = serde_json::from_str("3").unwrap();
        assert_eq!(price, Price::from_cents(300));
    }
}
