//! Marketplace domain types and logic for UpEnergy.
//!
//! This crate holds the client-side state of the carbon-credit marketplace:
//!
//! - **Cart**: line items keyed by token id, reducer transitions, pricing
//!   with the 5% platform fee, and a store that persists every change
//! - **Catalog**: token records as served by the marketplace API
//! - **Search**: the token grid's filters and sort orders
//!
//! # Example
//!
//! ```rust
//! use upenergy_cache::MemoryStore;
//! use upenergy_commerce::prelude::*;
//!
//! let mut cart = CartStore::open(MemoryStore::new());
//! cart.add(
//!     TokenDescriptor::new("T1")
//!         .with_unit_price(Money::from_dollars(10))
//!         .with_forward_credit(true),
//!     2,
//! );
//!
//! let pricing = cart.pricing();
//! assert_eq!(pricing.subtotal.display(), "$20.00");
//! assert_eq!(pricing.fees.display(), "$1.00");
//! println!("Total: {}", pricing.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        reduce, CartAction, CartLineItem, CartPricing, CartState, CartStore, LineItemPricing,
        TokenDescriptor, CART_STORAGE_KEY, PLATFORM_FEE_RATE,
    };

    // Catalog
    pub use crate::catalog::{unique_countries, unique_vintages, Token};

    // Search
    pub use crate::search::{CreditType, Filter, SortOption, StatusFilter, TokenQuery};
}
