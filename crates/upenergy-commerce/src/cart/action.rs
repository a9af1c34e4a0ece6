//! Cart transitions and the pure reducer that applies them.

use crate::cart::{CartLineItem, CartState};
use crate::ids::TokenId;
use std::collections::HashSet;
use std::fmt;

/// A named cart transition with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add an item, or increase the quantity of an existing one by
    /// `item.quantity`.
    AddItem(CartLineItem),
    /// Remove the item with this token id, if present.
    RemoveItem(TokenId),
    /// Overwrite the quantity of an existing item; `< 1` removes it.
    UpdateQuantity { token_id: TokenId, quantity: i64 },
    /// Remove every item.
    ClearCart,
    /// Replace the whole cart with a snapshot.
    LoadCart(Vec<CartLineItem>),
}

impl CartAction {
    /// Action name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "ADD_ITEM",
            CartAction::RemoveItem(_) => "REMOVE_ITEM",
            CartAction::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            CartAction::ClearCart => "CLEAR_CART",
            CartAction::LoadCart(_) => "LOAD_CART",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply one transition to a cart state, producing the next state.
///
/// Never fails and performs no I/O. Every returned state holds at most one
/// item per token id and only positive quantities.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(item) => {
            if item.quantity == 0 {
                return state;
            }
            match state.items.iter_mut().find(|i| i.token_id == item.token_id) {
                // Existing descriptive fields win; only the quantity moves.
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => state.items.push(item),
            }
            state
        }
        CartAction::RemoveItem(token_id) => {
            state.items.retain(|i| i.token_id != token_id);
            state
        }
        CartAction::UpdateQuantity { token_id, quantity } => {
            if quantity < 1 {
                return reduce(state, CartAction::RemoveItem(token_id));
            }
            if let Some(item) = state.items.iter_mut().find(|i| i.token_id == token_id) {
                item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
            state
        }
        CartAction::ClearCart => CartState::default(),
        CartAction::LoadCart(items) => CartState {
            items: normalize_snapshot(items),
        },
    }
}

/// Drop snapshot entries that would break the cart invariants: zero
/// quantities and repeated token ids (the first occurrence is kept).
fn normalize_snapshot(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut seen = HashSet::new();
    let before = items.len();
    let items: Vec<CartLineItem> = items
        .into_iter()
        .filter(|i| i.quantity > 0 && seen.insert(i.token_id.clone()))
        .collect();
    if items.len() < before {
        tracing::debug!(
            dropped = before - items.len(),
            "dropped invalid entries from cart snapshot"
        );
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::TokenDescriptor;
    use crate::money::Money;

    fn item(id: &str, quantity: u32) -> CartLineItem {
        CartLineItem::from_descriptor(TokenDescriptor::new(id), quantity)
    }

    #[test]
    fn test_add_new_item_appends() {
        let state = reduce(CartState::default(), CartAction::AddItem(item("A", 1)));
        let state = reduce(state, CartAction::AddItem(item("B", 2)));

        let ids: Vec<&str> = state.items().iter().map(|i| i.token_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_add_existing_keeps_first_metadata() {
        let first = CartLineItem::from_descriptor(
            TokenDescriptor::new("A").with_unit_price(Money::from_dollars(4)),
            1,
        );
        let second = CartLineItem::from_descriptor(
            TokenDescriptor::new("A")
                .with_unit_price(Money::from_dollars(9))
                .with_name("Renamed"),
            2,
        );

        let state = reduce(CartState::default(), CartAction::AddItem(first));
        let state = reduce(state, CartAction::AddItem(second));

        assert_eq!(state.len(), 1);
        let a = state.get(&TokenId::new("A")).unwrap();
        assert_eq!(a.quantity, 3);
        assert_eq!(a.unit_price, Money::from_dollars(4));
        assert_eq!(a.name, "Clean Cooking Project");
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let state = reduce(CartState::default(), CartAction::AddItem(item("A", 0)));
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_does_not_create() {
        let state = reduce(
            CartState::default(),
            CartAction::UpdateQuantity {
                token_id: TokenId::new("ghost"),
                quantity: 4,
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let state = reduce(CartState::default(), CartAction::AddItem(item("A", 3)));
        let state = reduce(
            state,
            CartAction::UpdateQuantity {
                token_id: TokenId::new("A"),
                quantity: -2,
            },
        );
        assert!(!state.contains(&TokenId::new("A")));
    }

    #[test]
    fn test_clear() {
        let state = reduce(CartState::default(), CartAction::AddItem(item("A", 3)));
        assert!(reduce(state, CartAction::ClearCart).is_empty());
    }

    #[test]
    fn test_load_replaces_and_normalizes() {
        let state = reduce(CartState::default(), CartAction::AddItem(item("old", 1)));
        let state = reduce(
            state,
            CartAction::LoadCart(vec![item("A", 2), item("B", 0), item("A", 5), item("C", 1)]),
        );

        let ids: Vec<(&str, u32)> = state
            .items()
            .iter()
            .map(|i| (i.token_id.as_str(), i.quantity))
            .collect();
        assert_eq!(ids, vec![("A", 2), ("C", 1)]);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(CartAction::ClearCart.to_string(), "CLEAR_CART");
        assert_eq!(CartAction::RemoveItem(TokenId::new("A")).name(), "REMOVE_ITEM");
    }
}
