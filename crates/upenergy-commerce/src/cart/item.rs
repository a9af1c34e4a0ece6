//! Cart line items and the token descriptors they are built from.

use crate::ids::TokenId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Project type assumed when a descriptor names none.
pub const DEFAULT_PROJECT_TYPE: &str = "Clean Cooking";
/// Fallback price per tonne, in whole dollars.
pub const DEFAULT_UNIT_PRICE_DOLLARS: i64 = 10;
/// Fallback vintage year.
pub const DEFAULT_VINTAGE: &str = "2024";
/// Fallback project location.
pub const DEFAULT_LOCATION: &str = "Unknown location";
/// Fallback crediting methodology.
pub const DEFAULT_METHODOLOGY: &str = "VCS-VM0007";
/// Fallback registry.
pub const DEFAULT_REGISTRY: &str = "VCS";
/// Fallback number of tonnes available.
pub const DEFAULT_AVAILABLE_UNITS: u32 = 100;

/// A token as offered to the cart by a catalog view.
///
/// Only `token_id` is required; everything else falls back to a default
/// when the line item is first created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenDescriptor {
    /// Token being added.
    pub token_id: TokenId,
    /// Explicit display name. Takes precedence over `project_type`.
    pub name: Option<String>,
    /// Project type, used to derive the name ("<type> Project").
    pub project_type: Option<String>,
    /// Price per tonne.
    pub unit_price: Option<Money>,
    /// Forward credit (pending verification) vs verified credit.
    pub is_forward_credit: Option<bool>,
    /// Vintage year.
    pub vintage: Option<String>,
    /// Explicit location. Takes precedence over `village`/`country`.
    pub location: Option<String>,
    /// Village the project is in.
    pub village: Option<String>,
    /// Country the project is in.
    pub country: Option<String>,
    /// Crediting methodology.
    pub methodology: Option<String>,
    /// Registry.
    pub registry: Option<String>,
    /// Tonnes available.
    pub available_units: Option<u32>,
}

impl TokenDescriptor {
    /// Create a descriptor carrying only a token id.
    pub fn new(token_id: impl Into<TokenId>) -> Self {
        Self {
            token_id: token_id.into(),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the project type.
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    /// Set the unit price.
    pub fn with_unit_price(mut self, price: Money) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// Set the credit-risk flag.
    pub fn with_forward_credit(mut self, is_forward_credit: bool) -> Self {
        self.is_forward_credit = Some(is_forward_credit);
        self
    }

    /// Set the vintage.
    pub fn with_vintage(mut self, vintage: impl Into<String>) -> Self {
        self.vintage = Some(vintage.into());
        self
    }

    /// Set village and country.
    pub fn with_place(mut self, village: impl Into<String>, country: impl Into<String>) -> Self {
        self.village = Some(village.into());
        self.country = Some(country.into());
        self
    }

    /// Set the methodology.
    pub fn with_methodology(mut self, methodology: impl Into<String>) -> Self {
        self.methodology = Some(methodology.into());
        self
    }

    /// Set the registry.
    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Set the available tonnes.
    pub fn with_available_units(mut self, units: u32) -> Self {
        self.available_units = Some(units);
        self
    }

    fn resolved_name(&self) -> String {
        match (&self.name, &self.project_type) {
            (Some(name), _) => name.clone(),
            (None, Some(project_type)) => format!("{} Project", project_type),
            (None, None) => format!("{} Project", DEFAULT_PROJECT_TYPE),
        }
    }

    fn resolved_location(&self) -> String {
        if let Some(location) = &self.location {
            return location.clone();
        }
        match (&self.village, &self.country) {
            (Some(village), Some(country)) => format!("{}, {}", village, country),
            (Some(part), None) | (None, Some(part)) => part.clone(),
            (None, None) => DEFAULT_LOCATION.to_string(),
        }
    }
}

/// One entry in the cart.
///
/// Descriptive fields are copied from the descriptor when the item is
/// created and are never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Token id; unique within a cart.
    pub token_id: TokenId,
    /// Display label.
    pub name: String,
    /// Price per tonne at the time the item was added.
    pub unit_price: Money,
    /// Tonnes requested. Always positive for items held by a cart.
    pub quantity: u32,
    /// Forward credit (higher risk) vs verified credit.
    pub is_forward_credit: bool,
    /// Vintage year.
    pub vintage: String,
    /// Project location.
    pub location: String,
    /// Crediting methodology.
    pub methodology: String,
    /// Registry.
    pub registry: String,
    /// Tonnes available when the item was added.
    pub available_units: u32,
}

impl CartLineItem {
    /// Build a line item from a descriptor, applying defaults.
    ///
    /// A negative price is clamped to zero.
    pub fn from_descriptor(token: TokenDescriptor, quantity: u32) -> Self {
        let unit_price = match token.unit_price {
            Some(price) if price.is_negative() => Money::ZERO,
            Some(price) => price,
            None => Money::from_dollars(DEFAULT_UNIT_PRICE_DOLLARS),
        };

        Self {
            name: token.resolved_name(),
            location: token.resolved_location(),
            unit_price,
            quantity,
            is_forward_credit: token.is_forward_credit.unwrap_or(true),
            vintage: token
                .vintage
                .unwrap_or_else(|| DEFAULT_VINTAGE.to_string()),
            methodology: token
                .methodology
                .unwrap_or_else(|| DEFAULT_METHODOLOGY.to_string()),
            registry: token
                .registry
                .unwrap_or_else(|| DEFAULT_REGISTRY.to_string()),
            available_units: token.available_units.unwrap_or(DEFAULT_AVAILABLE_UNITS),
            token_id: token.token_id,
        }
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let item = CartLineItem::from_descriptor(TokenDescriptor::new("T1"), 1);

        assert_eq!(item.token_id.as_str(), "T1");
        assert_eq!(item.name, "Clean Cooking Project");
        assert_eq!(item.unit_price, Money::from_dollars(10));
        assert!(item.is_forward_credit);
        assert_eq!(item.vintage, "2024");
        assert_eq!(item.location, "Unknown location");
        assert_eq!(item.methodology, "VCS-VM0007");
        assert_eq!(item.registry, "VCS");
        assert_eq!(item.available_units, 100);
    }

    #[test]
    fn test_forward_credit_only_false_when_explicit() {
        let verified = CartLineItem::from_descriptor(
            TokenDescriptor::new("T1").with_forward_credit(false),
            1,
        );
        assert!(!verified.is_forward_credit);
    }

    #[test]
    fn test_name_and_location_derivation() {
        let item = CartLineItem::from_descriptor(
            TokenDescriptor::new("T1")
                .with_project_type("Renewable Energy")
                .with_place("Kisumu", "Kenya"),
            1,
        );
        assert_eq!(item.name, "Renewable Energy Project");
        assert_eq!(item.location, "Kisumu, Kenya");

        let mut only_country = TokenDescriptor::new("T2");
        only_country.country = Some("Uganda".to_string());
        let item = CartLineItem::from_descriptor(only_country, 1);
        assert_eq!(item.location, "Uganda");
    }

    #[test]
    fn test_negative_price_clamped() {
        let item = CartLineItem::from_descriptor(
            TokenDescriptor::new("T1").with_unit_price(Money::from_dollars(-5)),
            1,
        );
        assert_eq!(item.unit_price, Money::ZERO);
    }

    #[test]
    fn test_snapshot_field_names() {
        let item = CartLineItem::from_descriptor(TokenDescriptor::new("T1"), 2);
        let value = serde_json::to_value(&item).unwrap();
        let obj = value.as_object().unwrap();

        for field in [
            "tokenId",
            "name",
            "unitPrice",
            "quantity",
            "isForwardCredit",
            "vintage",
            "location",
            "methodology",
            "registry",
            "availableUnits",
        ] {
            assert!(obj.contains_key(field), "missing {}", field);
        }
        assert_eq!(obj.len(), 10);
        assert!(obj["unitPrice"].is_number());
    }

    #[test]
    fn test_descriptor_from_partial_json() {
        let desc: TokenDescriptor =
            serde_json::from_str(r#"{"tokenId":"0.0.42","unitPrice":7.25,"isForwardCredit":false}"#)
                .unwrap();
        assert_eq!(desc.token_id.as_str(), "0.0.42");
        assert_eq!(desc.unit_price, Some(Money::from_cents(725)));
        assert_eq!(desc.is_forward_credit, Some(false));
        assert!(desc.name.is_none());
    }
}
