//! Token records as served by the marketplace API.

use crate::cart::TokenDescriptor;
use crate::ids::{AccountId, TokenId};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A carbon-credit token tied to a distributed cookstove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token id.
    #[serde(rename = "tokenId")]
    pub token_id: TokenId,
    /// Device serial number.
    #[serde(default)]
    pub serial: String,
    /// Display name, if the registry gave one.
    #[serde(default)]
    pub name: Option<String>,
    /// Village of distribution.
    #[serde(default)]
    pub village: Option<String>,
    /// District of distribution.
    #[serde(default)]
    pub district: Option<String>,
    /// Country of distribution.
    #[serde(default)]
    pub country: String,
    /// Listed for sale. The API sends either a bool or 0/1.
    #[serde(default, deserialize_with = "bool_or_int")]
    pub for_sale: bool,
    /// Owning account; empty strings are read as no owner.
    #[serde(default, deserialize_with = "non_empty_account")]
    pub account: Option<AccountId>,
    /// Distribution date, as sent (ISO date or date-time).
    #[serde(default)]
    pub distribution_date: Option<String>,
    /// Buyer rating, when known.
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Token {
    /// Create a token with only an id and country; everything else empty.
    pub fn new(token_id: impl Into<TokenId>, country: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            serial: String::new(),
            name: None,
            village: None,
            district: None,
            country: country.into(),
            for_sale: false,
            account: None,
            distribution_date: None,
            rating: None,
        }
    }

    /// Whether the token has an owner.
    pub fn is_owned(&self) -> bool {
        self.account.is_some()
    }

    /// Whether the token is owned by `account`.
    pub fn is_owned_by(&self, account: &AccountId) -> bool {
        self.account.as_ref() == Some(account)
    }

    /// Parsed distribution timestamp, if the date is readable.
    pub fn distributed_at(&self) -> Option<NaiveDateTime> {
        self.distribution_date.as_deref().and_then(parse_date)
    }

    /// Year of distribution, used as the vintage.
    pub fn vintage_year(&self) -> Option<i32> {
        self.distributed_at().map(|d| d.year())
    }

    /// Numeric price proxy derived from the token id.
    pub fn price_rank(&self) -> Option<u64> {
        self.token_id.numeric_part()
    }

    /// Describe this token for the cart.
    pub fn to_descriptor(&self) -> TokenDescriptor {
        let mut descriptor = TokenDescriptor::new(self.token_id.clone());
        descriptor.name = self.name.clone();
        descriptor.village = self.village.clone();
        if !self.country.is_empty() {
            descriptor.country = Some(self.country.clone());
        }
        if let Some(year) = self.vintage_year() {
            descriptor.vintage = Some(year.to_string());
        }
        descriptor
    }
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn bool_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(Option<()>),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n == 1,
        Flag::Null(_) => false,
    })
}

fn non_empty_account<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AccountId>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(AccountId::new))
}
