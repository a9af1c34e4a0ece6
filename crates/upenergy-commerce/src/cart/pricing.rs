//! Cart pricing calculations.

use crate::ids::TokenId;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Platform fee charged on the subtotal (5%).
pub const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Complete pricing breakdown for a cart.
///
/// Amounts are kept at full precision; use [`Money::display`] to round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Platform fee.
    pub fees: Money,
    /// Subtotal plus fees.
    pub total: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Subtotal of forward-credit lines only.
    pub fn forward_credit_subtotal(&self) -> Money {
        self.line_items
            .iter()
            .filter(|l| l.is_forward_credit)
            .map(|l| l.total)
            .sum()
    }

    /// Subtotal of verified-credit lines only.
    pub fn verified_subtotal(&self) -> Money {
        self.line_items
            .iter()
            .filter(|l| !l.is_forward_credit)
            .map(|l| l.total)
            .sum()
    }

    /// Fee as a percentage of the subtotal (0 for an empty cart).
    pub fn fee_percentage(&self) -> Decimal {
        if self.subtotal.is_zero() {
            return Decimal::ZERO;
        }
        self.fees.amount() / self.subtotal.amount() * Decimal::ONE_HUNDRED
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Token id.
    pub token_id: TokenId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub total: Money,
    /// Credit-risk bucket of the line.
    pub is_forward_credit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rate_is_five_percent() {
        assert_eq!(PLATFORM_FEE_RATE, Decimal::new(5, 2));
    }

    #[test]
    fn test_bucket_subtotals() {
        let line = |id: &str, dollars: i64, forward: bool| LineItemPricing {
            token_id: TokenId::new(id),
            unit_price: Money::from_dollars(dollars),
            quantity: 1,
            total: Money::from_dollars(dollars),
            is_forward_credit: forward,
        };
        let pricing = CartPricing {
            item_count: 3,
            subtotal: Money::from_dollars(60),
            fees: Money::from_dollars(3),
            total: Money::from_dollars(63),
            line_items: vec![line("A", 10, true), line("B", 20, false), line("C", 30, true)],
        };

        assert_eq!(pricing.forward_credit_subtotal(), Money::from_dollars(40));
        assert_eq!(pricing.verified_subtotal(), Money::from_dollars(20));
        assert_eq!(pricing.fee_percentage(), Decimal::from(5));
    }

    #[test]
    fn test_fee_percentage_empty() {
        let pricing = CartPricing {
            item_count: 0,
            subtotal: Money::ZERO,
            fees: Money::ZERO,
            total: Money::ZERO,
            line_items: vec![],
        };
        assert_eq!(pricing.fee_percentage(), Decimal::ZERO);
    }
}
