//! Search module.
//!
//! Filtering and sorting for the token grid.

mod filter;
mod query;

pub use filter::{CreditType, Filter, StatusFilter};
pub use query::{SortOption, TokenQuery};
