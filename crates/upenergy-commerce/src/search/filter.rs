//! Token grid filters.

use crate::catalog::Token;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ownership / listing status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Listed for sale.
    ForSale,
    /// Has an owner.
    Owned,
    /// Has no owner.
    Available,
}

impl StatusFilter {
    /// Wire name, as accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::ForSale => "for_sale",
            StatusFilter::Owned => "owned",
            StatusFilter::Available => "available",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "for_sale" => Ok(StatusFilter::ForSale),
            "owned" => Ok(StatusFilter::Owned),
            "available" => Ok(StatusFilter::Available),
            other => Err(CommerceError::InvalidStatusFilter(other.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit category offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditType {
    /// Forward credit token.
    #[serde(rename = "FCT")]
    ForwardCredit,
    /// Verified credit.
    Verified,
}

impl FromStr for CreditType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FCT" | "fct" => Ok(CreditType::ForwardCredit),
            "Verified" | "verified" => Ok(CreditType::Verified),
            other => Err(CommerceError::InvalidCreditType(other.to_string())),
        }
    }
}

/// A token grid filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of token id, serial, name or village.
    Text(String),
    /// Exact country.
    Country(String),
    /// Listing / ownership status.
    Status(StatusFilter),
    /// Year of distribution.
    Vintage(i32),
    /// Credit category. Token records carry no category, so this matches
    /// every token.
    CreditType(CreditType),
    /// Methodology. Not present on token records; matches every token.
    Methodology(String),
    /// Project type. Not present on token records; matches every token.
    ProjectType(String),
    /// Price range in whole dollars per tonne. Token records carry no
    /// price; matches every token.
    PriceRange { min: u32, max: u32 },
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a country filter.
    pub fn country(country: impl Into<String>) -> Self {
        Filter::Country(country.into())
    }

    /// Check whether a token passes this filter.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                let hit = |s: &str| s.to_lowercase().contains(&needle);
                hit(token.token_id.as_str())
                    || hit(&token.serial)
                    || token.name.as_deref().is_some_and(hit)
                    || token.village.as_deref().is_some_and(hit)
            }
            Filter::Country(country) => &token.country == country,
            Filter::Status(StatusFilter::ForSale) => token.for_sale,
            Filter::Status(StatusFilter::Owned) => token.is_owned(),
            Filter::Status(StatusFilter::Available) => !token.is_owned(),
            Filter::Vintage(year) => token.vintage_year() == Some(*year),
            Filter::CreditType(_)
            | Filter::Methodology(_)
            | Filter::ProjectType(_)
            | Filter::PriceRange { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AccountId;

    fn sample() -> Token {
        let mut token = Token::new("0.0.1234", "Uganda");
        token.serial = "SN-ABC".to_string();
        token.village = Some("Gulu".to_string());
        token.distribution_date = Some("2024-02-10".to_string());
        token
    }

    #[test]
    fn test_text_filter_fields() {
        let token = sample();
        assert!(Filter::text("1234").matches(&token));
        assert!(Filter::text("sn-abc").matches(&token));
        assert!(Filter::text("GULU").matches(&token));
        assert!(!Filter::text("kisumu").matches(&token));
    }

    #[test]
    fn test_status_filters() {
        let mut token = sample();
        assert!(Filter::Status(StatusFilter::Available).matches(&token));
        assert!(!Filter::Status(StatusFilter::Owned).matches(&token));
        assert!(!Filter::Status(StatusFilter::ForSale).matches(&token));

        token.account = Some(AccountId::new("0.0.99"));
        token.for_sale = true;
        assert!(Filter::Status(StatusFilter::Owned).matches(&token));
        assert!(Filter::Status(StatusFilter::ForSale).matches(&token));
        assert!(!Filter::Status(StatusFilter::Available).matches(&token));
    }

    #[test]
    fn test_vintage_and_country() {
        let token = sample();
        assert!(Filter::Vintage(2024).matches(&token));
        assert!(!Filter::Vintage(2023).matches(&token));
        assert!(Filter::country("Uganda").matches(&token));
        assert!(!Filter::country("uganda").matches(&token));
    }

    #[test]
    fn test_panel_only_filters_match_everything() {
        let token = sample();
        assert!(Filter::CreditType(CreditType::Verified).matches(&token));
        assert!(Filter::PriceRange { min: 3, max: 4 }.matches(&token));
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("owned".parse::<StatusFilter>().unwrap(), StatusFilter::Owned);
        assert!("sold".parse::<StatusFilter>().is_err());
        assert_eq!("FCT".parse::<CreditType>().unwrap(), CreditType::ForwardCredit);
    }
}
