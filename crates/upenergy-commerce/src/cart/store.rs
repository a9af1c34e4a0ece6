//! The cart store: cart state plus its persisted snapshot.

use crate::cart::{reduce, CartAction, CartLineItem, CartPricing, CartState, TokenDescriptor};
use crate::error::CommerceError;
use crate::ids::TokenId;
use crate::money::Money;
use tracing::{debug, warn};
use upenergy_cache::{Cache, KeyValueStore};

/// Storage key of the cart snapshot.
pub const CART_STORAGE_KEY: &str = "upenergy-cart";

/// Owns the cart for a session and keeps its snapshot in sync.
///
/// Every mutation runs the reducer and then writes the full item list to
/// the store. Writes are best-effort: a failed write is logged and the
/// in-memory change stands.
///
/// # Example
///
/// ```
/// use upenergy_cache::MemoryStore;
/// use upenergy_commerce::cart::{CartStore, TokenDescriptor};
/// use upenergy_commerce::money::Money;
///
/// let mut cart = CartStore::open(MemoryStore::new());
/// cart.add(TokenDescriptor::new("T1").with_unit_price(Money::from_dollars(10)), 2);
/// assert_eq!(cart.total().display(), "$21.00");
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart persisted under [`CART_STORAGE_KEY`].
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, CART_STORAGE_KEY)
    }

    /// Open the cart persisted under `key`.
    ///
    /// A missing snapshot starts an empty cart. So does a snapshot that
    /// can't be read or decoded; the failure is logged, not returned.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cache = Cache::new(store);

        let state = match cache.get::<Vec<CartLineItem>>(&key) {
            Ok(Some(items)) => {
                debug!(key = %key, items = items.len(), "restored cart snapshot");
                reduce(CartState::default(), CartAction::LoadCart(items))
            }
            Ok(None) => CartState::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "error loading cart from storage, starting empty");
                CartState::default()
            }
        };

        Self { state, cache, key }
    }

    /// Apply a transition and persist the result.
    pub fn dispatch(&mut self, action: CartAction) {
        let name = action.name();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        debug!(action = name, items = self.state.len(), "cart transition");
        self.persist();
    }

    /// Add `quantity` of a token. An already present token keeps its
    /// descriptive fields and only gains quantity.
    pub fn add(&mut self, token: TokenDescriptor, quantity: u32) {
        let item = CartLineItem::from_descriptor(token, quantity);
        self.dispatch(CartAction::AddItem(item));
    }

    /// Add a single unit of a token.
    pub fn add_one(&mut self, token: TokenDescriptor) {
        self.add(token, 1);
    }

    /// Remove a token. Absent tokens are ignored.
    pub fn remove(&mut self, token_id: &TokenId) {
        self.dispatch(CartAction::RemoveItem(token_id.clone()));
    }

    /// Set a token's quantity; values below 1 remove it. Never adds a
    /// token that isn't already in the cart.
    pub fn set_quantity(&mut self, token_id: &TokenId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            token_id: token_id.clone(),
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Replace the cart with a snapshot.
    pub fn hydrate(&mut self, items: Vec<CartLineItem>) {
        self.dispatch(CartAction::LoadCart(items));
    }

    /// Replace the cart with a JSON snapshot.
    ///
    /// Unlike [`open`](Self::open), a malformed snapshot is returned as an
    /// error and the cart is left untouched.
    pub fn hydrate_json(&mut self, raw: &str) -> Result<(), CommerceError> {
        let items: Vec<CartLineItem> = serde_json::from_str(raw)?;
        self.hydrate(items);
        Ok(())
    }

    /// The current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        self.state.items()
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.state.total_item_count()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    /// Platform fee on the subtotal.
    pub fn fees(&self) -> Money {
        self.state.fees()
    }

    /// Subtotal plus fees.
    pub fn total(&self) -> Money {
        self.state.total()
    }

    /// Forward-credit items.
    pub fn forward_credit_items(&self) -> Vec<&CartLineItem> {
        self.state.forward_credit_items()
    }

    /// Verified-credit items.
    pub fn verified_items(&self) -> Vec<&CartLineItem> {
        self.state.verified_items()
    }

    /// Whether the token is in the cart.
    pub fn contains(&self, token_id: &TokenId) -> bool {
        self.state.contains(token_id)
    }

    /// Quantity of the token, or 0.
    pub fn quantity_of(&self, token_id: &TokenId) -> u32 {
        self.state.quantity_of(token_id)
    }

    /// Pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        self.state.pricing()
    }

    /// Storage key this cart persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, self.state.items()) {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}
