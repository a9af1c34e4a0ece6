//! Token grid query builder.

use crate::catalog::Token;
use crate::error::CommerceError;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for the token grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Most recently distributed first.
    #[default]
    Newest,
    /// Earliest distributed first.
    Oldest,
    /// Price proxy, low to high.
    PriceLowHigh,
    /// Price proxy, high to low.
    PriceHighLow,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
        SortOption::Rating,
    ];

    /// Wire name, as accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceLowHigh => "price_low_high",
            SortOption::PriceHighLow => "price_high_low",
            SortOption::Rating => "rating",
        }
    }

    /// Label for the sort menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::Oldest => "Oldest",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Compare two tokens. Tokens missing the sort key go last.
    fn compare(&self, a: &Token, b: &Token) -> Ordering {
        match self {
            SortOption::Newest => last_if_none(a.distributed_at(), b.distributed_at(), true),
            SortOption::Oldest => last_if_none(a.distributed_at(), b.distributed_at(), false),
            SortOption::PriceLowHigh => last_if_none(a.price_rank(), b.price_rank(), false),
            SortOption::PriceHighLow => last_if_none(a.price_rank(), b.price_rank(), true),
            SortOption::Rating => match (a.rating, b.rating) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

fn last_if_none<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| CommerceError::InvalidSortOption(s.to_string()))
    }
}

/// A token grid query: search text, filters and a sort order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TokenQuery {
    /// Filters to apply; a token must pass all of them.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl TokenQuery {
    /// Create an empty query sorted newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text. Blank text adds no filter.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.filters.push(Filter::Text(q));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Drop all filters and go back to the default sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a token passes every filter.
    pub fn matches(&self, token: &Token) -> bool {
        self.filters.iter().all(|f| f.matches(token))
    }

    /// Filter and sort `tokens`. The sort is stable.
    pub fn apply<'a>(&self, tokens: &'a [Token]) -> Vec<&'a Token> {
        let mut hits: Vec<&Token> = tokens.iter().filter(|t| self.matches(t)).collect();
        hits.sort_by(|a, b| self.sort.compare(a, b));
        hits
    }
}
