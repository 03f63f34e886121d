//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Backend entities
//! (products, orders) carry opaque string identifiers assigned by the API;
//! Telegram user IDs are numeric and get their own newtype below.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper over an opaque backend string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use petal_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget_id = WidgetId::new("w-1");
/// let gadget_id = GadgetId::new("g-1");
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);

/// Telegram user identifier.
///
/// Numeric on the wire (Telegram assigns 64-bit integer IDs), so this is
/// not part of the string-backed `define_id!` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelegramUserId(i64);

impl TelegramUserId {
    /// Create a new Telegram user ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TelegramUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TelegramUserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TelegramUserId> for i64 {
    fn from(id: TelegramUserId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_roundtrip() {
        let id = ProductId::new("prod-42");
        assert_eq!(id.to_string(), "prod-42");
        assert_eq!(id.as_str(), "prod-42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = OrderId::new("ord-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ord-7\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_telegram_user_id_serde() {
        let id = TelegramUserId::new(123_456_789);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "123456789");
        let back: TelegramUserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_i64(), 123_456_789);
    }
}
