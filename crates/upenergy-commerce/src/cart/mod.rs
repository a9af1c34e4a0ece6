//! Shopping cart module.
//!
//! The cart is a reducer over [`CartState`]: [`CartAction`]s go through
//! the pure [`reduce`] function, and [`CartStore`] wraps that with
//! persistence through an injected key-value store.

mod action;
mod item;
mod pricing;
mod state;
mod store;

pub use action::{reduce, CartAction};
pub use item::{
    CartLineItem, TokenDescriptor, DEFAULT_AVAILABLE_UNITS, DEFAULT_LOCATION, DEFAULT_METHODOLOGY,
    DEFAULT_PROJECT_TYPE, DEFAULT_REGISTRY, DEFAULT_UNIT_PRICE_DOLLARS, DEFAULT_VINTAGE,
};
pub use pricing::{CartPricing, LineItemPricing, PLATFORM_FEE_RATE};
pub use state::CartState;
pub use store::{CartStore, CART_STORAGE_KEY};
