//! Newtype IDs for type-safe identifiers.
//!
//! Ids are assigned by the remote API. Some back ends send them as JSON
//! strings (`"id": "12"`), so deserialization accepts both forms while
//! serialization always writes a number.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw id.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer)?
                    .into_i64()
                    .map(Self)
                    .map_err(D::Error::custom)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Product`](crate::catalog::Product).
    ProductId
);
define_id!(
    /// Identifier of a [`User`](crate::account::User).
    UserId
);

/// Wire form of an id: a JSON integer or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    fn into_i64(self) -> Result<i64, String> {
        match self {
            RawId::Int(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("invalid id {:?}", text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_or_string() {
        let a: ProductId = serde_json::from_str("12").unwrap();
        let b: ProductId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(), 12);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<UserId, _> = serde_json::from_str("\"abc\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UserId::new(3)).unwrap(), "3");
    }

    #[test]
    fn test_from_str_and_display() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id.to_string(), "42");
        assert!("forty-two".parse::<ProductId>().is_err());
    }
}
