//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are short opaque strings (e.g. `coffee-001`) rather
//! than database integers, so the wrappers here are `String`-backed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use erasto_core::define_id;
/// define_id!(OrderId);
/// define_id!(SkuId);
///
/// let order_id = OrderId::new("EC123456789");
/// let sku_id = SkuId::new("EC123456789");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = sku_id;
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
            ::serde::Deserialize
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

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

/// URL-friendly product handle (e.g. `kilimanjaro-morning-blend`).
///
/// Unlike the IDs above, a slug is only ever used for lookup, so it is a plain
/// wrapper without the full conversion surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_and_eq() {
        let id = ProductId::new("coffee-001");
        assert_eq!(id.to_string(), "coffee-001");
        assert_eq!(id, "coffee-001");
        assert_eq!(id.as_str(), "coffee-001");
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::from("coffee-002");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"coffee-002\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display_honors_width() {
        let id = ProductId::new("coffee-001");
        assert_eq!(format!("{id:<12}|"), "coffee-001  |");
        assert_eq!(format!("{:>12}", OrderId::new("EC1")), "         EC1");
        assert_eq!(format!("{:<6}|", Slug::new("mug")), "mug   |");
    }

    #[test]
    fn test_slug_display() {
        let slug = Slug::new("tanzanian-peaberry");
        assert_eq!(format!("{slug}"), "tanzanian-peaberry");
    }
}
