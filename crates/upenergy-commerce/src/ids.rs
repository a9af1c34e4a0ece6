//! Newtype IDs for type-safe identifiers.
//!
//! Token ids and Hedera account ids are both dotted strings (`0.0.1234`),
//! so keeping them as distinct types stops one being passed for the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a tradable carbon-credit token; the cart's line-item key.
    TokenId
);
define_id!(
    /// A Hedera account that owns or buys tokens.
    AccountId
);

impl TokenId {
    /// Digits of the id concatenated, e.g. `0.0.4521` -> `004521` -> 4521.
    ///
    /// The grid uses this as its price proxy when sorting.
    pub fn numeric_part(&self) -> Option<u64> {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}
