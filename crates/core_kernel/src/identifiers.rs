//! Strongly-typed identifiers for catalog and order entities
//!
//! The Northwind schema keys every table with a 32-bit integer. Newtype
//! wrappers keep a `ProductId` from being passed where a `CategoryId` is
//! expected while still serializing as a plain JSON number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates an identifier from its raw column value
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Returns the raw column value
            pub const fn value(&self) -> i32 {
                self.0
            }

            /// Returns the identifier that follows this one, or `None` at `i32::MAX`
            pub const fn next(&self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(value) => Some(Self(value)),
                    None => None,
                }
            }

            /// Returns the entity name used in error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(CategoryId, "Category");
define_id!(ProductId, "Product");
define_id!(OrderId, "Order");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(CategoryId::new(9).to_string(), "9");
    }

    #[test]
    fn test_next_increments() {
        assert_eq!(OrderId::new(10248).next(), Some(OrderId::new(10249)));
    }

    #[test]
    fn test_next_stops_at_max() {
        assert_eq!(CategoryId::new(i32::MAX).next(), None);
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
