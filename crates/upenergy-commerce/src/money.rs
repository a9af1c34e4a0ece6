//! Money type for representing USD amounts.
//!
//! Backed by a base-10 decimal so that percentage fees are exact; amounts
//! are only rounded to cents when displayed. Arithmetic saturates at the
//! decimal range instead of overflowing.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A USD amount at full decimal precision.
///
/// Serializes as a plain JSON number, matching the cart snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wrap a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from cents.
    ///
    /// ```
    /// use upenergy_commerce::money::Money;
    /// let price = Money::from_cents(1250);
    /// assert_eq!(price.display(), "$12.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money value from whole dollars.
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Convert from a float. Returns `None` for NaN or infinities.
    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64(amount).map(Self)
    }

    /// The underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiply by a decimal rate (e.g. `0.05` for 5%).
    pub fn multiply_rate(&self, rate: Decimal) -> Money {
        let negative = self.0.is_sign_negative() != rate.is_sign_negative();
        Money(self.0.checked_mul(rate).unwrap_or_else(|| bound(negative)))
    }

    /// Whether this amount sits at the edge of the representable range.
    pub fn is_saturated(&self) -> bool {
        self.0 == Decimal::MAX || self.0 == Decimal::MIN
    }

    /// Round to cents, halves away from zero.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("${}", self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.rounded().0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        // overflow only happens when both operands share a sign
        Money(
            self.0
                .checked_add(other.0)
                .unwrap_or_else(|| bound(other.0.is_sign_negative())),
        )
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(
            self.0
                .checked_sub(other.0)
                .unwrap_or_else(|| bound(self.0.is_sign_negative())),
        )
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        Money(
            self.0
                .checked_mul(Decimal::from(factor))
                .unwrap_or_else(|| bound(self.0.is_sign_negative())),
        )
    }
}

fn bound(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::from_cents(4999);
        assert_eq!(m.amount(), Decimal::new(4999, 2));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).display(), "$49.99");
        assert_eq!(Money::from_dollars(10).display(), "$10.00");
        assert_eq!(Money::new(Decimal::new(10125, 3)).display(), "$10.13");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_dollars(10);
        let b = Money::from_cents(550);
        assert_eq!(a + b, Money::from_cents(1550));
        assert_eq!(a - b, Money::from_cents(450));
        assert_eq!(b * 3, Money::from_cents(1650));
    }

    #[test]
    fn test_rate_keeps_full_precision() {
        // 5% of $0.01 is half a tenth of a cent; nothing is lost until display.
        let fee = Money::from_cents(1).multiply_rate(Decimal::new(5, 2));
        assert_eq!(fee.amount(), Decimal::new(5, 4));
        assert_eq!(fee.display(), "$0.00");
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = Money::new(Decimal::from_i128_with_scale(10i128.pow(20), 0));

        let product = huge * u32::MAX;
        assert_eq!(product.amount(), Decimal::MAX);
        assert!(product.is_saturated());

        assert_eq!((product + huge).amount(), Decimal::MAX);
        assert_eq!((Money::new(Decimal::MIN) - huge).amount(), Decimal::MIN);
        assert_eq!((Money::new(-huge.amount()) * u32::MAX).amount(), Decimal::MIN);
        assert!(!Money::from_dollars(10).is_saturated());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_dollars(1), Money::from_dollars(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_dollars(3));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");

        let parsed: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed, Money::from_cents(1250));

        let parsed: Money = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, Money::from_dollars(10));
    }
}
