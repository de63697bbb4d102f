//! Product listing filters and sort orders.

use erasto_core::{Category, Product, RoastLevel};
use rust_decimal::Decimal;

/// Upper bound of the price filter when none is configured.
pub const DEFAULT_PRICE_CEILING: Decimal = Decimal::ONE_HUNDRED;

/// Sort order for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// New arrivals first, otherwise catalog order.
    Newest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortOption {
    /// Returns the query-string name of the sort order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    /// Sort in place. The sort is stable, so ties keep catalog order.
    pub fn apply(self, products: &mut [&Product]) {
        match self {
            Self::Featured => products.sort_by_key(|p| !p.featured),
            Self::Newest => products.sort_by_key(|p| !p.new_arrival),
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(format!("invalid sort option: {s}")),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Decimal::ZERO, DEFAULT_PRICE_CEILING)
    }
}

/// Filter and sort state for the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    /// `None` shows every category.
    pub category: Option<Category>,
    /// Empty shows every roast. Products without a roast level always pass.
    pub roast_levels: Vec<RoastLevel>,
    pub price_range: PriceRange,
    pub sort: SortOption,
}

impl ProductQuery {
    /// Default query with a custom price ceiling.
    #[must_use]
    pub fn with_price_ceiling(max: Decimal) -> Self {
        Self {
            price_range: PriceRange::new(Decimal::ZERO, max),
            ..Self::default()
        }
    }

    /// Add the roast level to the filter, or remove it if already selected.
    pub fn toggle_roast(&mut self, level: RoastLevel) {
        if let Some(pos) = self.roast_levels.iter().position(|l| *l == level) {
            self.roast_levels.remove(pos);
        } else {
            self.roast_levels.push(level);
        }
    }

    /// Clear every filter and restore the default sort, keeping the price
    /// ceiling.
    pub fn reset(&mut self) {
        *self = Self::with_price_ceiling(self.price_range.max);
    }

    /// Whether a product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }

        if !self.roast_levels.is_empty()
            && product
                .roast_level
                .is_some_and(|level| !self.roast_levels.contains(&level))
        {
            return false;
        }

        self.price_range.contains(product.price)
    }
}
