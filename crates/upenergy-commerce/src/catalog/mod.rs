//! Token catalog module.
//!
//! Token records and the option lists the grid's filter panel offers.

mod token;

pub use token::Token;

use std::collections::BTreeSet;

/// Distinct countries, sorted.
pub fn unique_countries(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct distribution years, newest first.
pub fn unique_vintages(tokens: &[Token]) -> Vec<i32> {
    tokens
        .iter()
        .filter_map(Token::vintage_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
