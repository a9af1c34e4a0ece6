//! Cart state and its derived queries.

use crate::cart::{CartLineItem, CartPricing, LineItemPricing, PLATFORM_FEE_RATE};
use crate::ids::TokenId;
use crate::money::Money;
use serde::Serialize;

/// The ordered set of line items in a cart.
///
/// Only [`reduce`](crate::cart::reduce) produces new states, so the
/// invariants (unique token ids, positive quantities) hold for every value
/// a caller can observe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    pub(crate) items: Vec<CartLineItem>,
}

impl CartState {
    /// Items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by token id.
    pub fn get(&self, token_id: &TokenId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.token_id == token_id)
    }

    /// Whether the token is in the cart.
    pub fn contains(&self, token_id: &TokenId) -> bool {
        self.get(token_id).is_some()
    }

    /// Quantity of the token, or 0 if absent.
    pub fn quantity_of(&self, token_id: &TokenId) -> u32 {
        self.get(token_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Sum of quantities across all items.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Platform fee on the subtotal.
    pub fn fees(&self) -> Money {
        self.subtotal().multiply_rate(PLATFORM_FEE_RATE)
    }

    /// Subtotal plus fees.
    pub fn total(&self) -> Money {
        self.subtotal() + self.fees()
    }

    /// Forward-credit items, in insertion order.
    pub fn forward_credit_items(&self) -> Vec<&CartLineItem> {
        self.items.iter().filter(|i| i.is_forward_credit).collect()
    }

    /// Verified-credit items, in insertion order.
    pub fn verified_items(&self) -> Vec<&CartLineItem> {
        self.items.iter().filter(|i| !i.is_forward_credit).collect()
    }

    /// Full pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        let line_items = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                token_id: item.token_id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total: item.line_total(),
                is_forward_credit: item.is_forward_credit,
            })
            .collect();

        let subtotal = self.subtotal();
        let fees = subtotal.multiply_rate(PLATFORM_FEE_RATE);

        CartPricing {
            item_count: self.total_item_count(),
            subtotal,
            fees,
            total: subtotal + fees,
            line_items,
        }
    }
}
