//! Catalog product types and add-to-cart selection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLineItem;
use super::id::{ProductId, Slug};

/// Grind offered by default for whole-bean products.
pub const DEFAULT_GRIND: &str = "Whole Bean";

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Beans,
    Ground,
    Instant,
    Accessories,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Beans, Self::Ground, Self::Instant, Self::Accessories];

    /// Returns the wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beans => "beans",
            Self::Ground => "ground",
            Self::Instant => "instant",
            Self::Accessories => "accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beans" => Ok(Self::Beans),
            "ground" => Ok(Self::Ground),
            "instant" => Ok(Self::Instant),
            "accessories" => Ok(Self::Accessories),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Roast level of a coffee product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
}

impl RoastLevel {
    /// Returns the wire name of the roast level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for RoastLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("invalid roast level: {s}")),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    /// One-line summary shown on product cards.
    pub description: String,
    /// Long-form copy for the product page.
    pub details: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Card thumbnail.
    pub image: String,
    /// Gallery images for the product page.
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub roast_level: Option<RoastLevel>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub flavor_notes: Vec<String>,
    /// Package sizes on offer (`"250g"`, `"1kg"`, `"One Size"`).
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub grind_options: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub new_arrival: bool,
    pub stock: u32,
}

impl Product {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether the product should carry a "Low Stock" badge.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Size preselected on the product page.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Grind preselected on the product page: whole bean for bean products.
    #[must_use]
    pub fn default_grind(&self) -> Option<&str> {
        if self.category == Category::Beans && self.grind_options.iter().any(|g| g == DEFAULT_GRIND)
        {
            Some(DEFAULT_GRIND)
        } else {
            None
        }
    }

    /// Build a cart line item from a product page selection.
    ///
    /// Missing size and grind fall back to [`Product::default_size`] and
    /// [`Product::default_grind`]. The display fields are copied from the
    /// product as it is right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is out of stock, the quantity is not
    /// within `1..=stock`, or the size or grind is not offered.
    pub fn line_item(&self, selection: &LineSelection) -> Result<CartLineItem, SelectionError> {
        if !self.is_in_stock() {
            return Err(SelectionError::OutOfStock(self.id.clone()));
        }

        if selection.quantity < 1 || selection.quantity > self.stock {
            return Err(SelectionError::QuantityOutOfRange {
                requested: selection.quantity,
                available: self.stock,
            });
        }

        let size = match selection.size.as_deref() {
            Some(size) if self.sizes.iter().any(|s| s == size) => Some(size.to_owned()),
            Some(size) => return Err(SelectionError::UnknownSize(size.to_owned())),
            None => self.default_size().map(str::to_owned),
        };

        let grind = match selection.grind.as_deref() {
            Some(grind) if self.grind_options.iter().any(|g| g == grind) => Some(grind.to_owned()),
            Some(grind) => return Err(SelectionError::UnknownGrind(grind.to_owned())),
            None => self.default_grind().map(str::to_owned),
        };

        Ok(CartLineItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image_ref: self.image.clone(),
            quantity: selection.quantity,
            variant_grind: grind,
            variant_size: size,
        })
    }
}

/// Choices made on the product page before adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub quantity: u32,
    pub size: Option<String>,
    pub grind: Option<String>,
}

impl Default for LineSelection {
    fn default() -> Self {
        Self {
            quantity: 1,
            size: None,
            grind: None,
        }
    }
}

/// Errors that can occur when turning a selection into a line item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The product has no stock.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    /// Quantity is zero or more than is in stock.
    #[error("quantity must be between 1 and {available} (got {requested})")]
    QuantityOutOfRange {
        /// Quantity asked for.
        requested: u32,
        /// Units in stock.
        available: u32,
    },
    /// The product is not sold in this size.
    #[error("size not offered: {0}")]
    UnknownSize(String),
    /// The product is not sold with this grind.
    #[error("grind not offered: {0}")]
    UnknownGrind(String),
}
