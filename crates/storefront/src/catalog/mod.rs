//! Static product catalog.
//!
//! The built-in catalog is embedded from `data/products.json` at compile time.
//! It is read-only: the cart copies what it needs out of a [`Product`] when an
//! item is added and never looks products up again.

pub mod query;

use std::collections::HashSet;

use erasto_core::{Category, Product, ProductId};
use thiserror::Error;

pub use query::{DEFAULT_PRICE_CEILING, PriceRange, ProductQuery, SortOption};

const BUILTIN_PRODUCTS: &str = include_str!("../../data/products.json");

/// Number of related products shown on a product page.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Errors that can occur when loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product data is not valid JSON of the expected shape.
    #[error("Invalid product data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an ID or slug.
    #[error("Duplicate product {field}: {value}")]
    Duplicate {
        /// `"id"` or `"slug"`.
        field: &'static str,
        /// The repeated value.
        value: String,
    },

    /// No product with the given ID or slug.
    #[error("Product not found: {0}")]
    NotFound(String),
}

/// Read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if two products share an ID or slug.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for product in &products {
            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    field: "id",
                    value: product.id.to_string(),
                });
            }
            if !slugs.insert(product.slug.as_str()) {
                return Err(CatalogError::Duplicate {
                    field: "slug",
                    value: product.slug.to_string(),
                });
            }
        }

        tracing::debug!(products = products.len(), "Catalog loaded");
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded product data is corrupt.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_PRODUCTS)
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug.as_str() == slug)
    }

    /// Look up a product by slug, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown slugs.
    pub fn require_slug(&self, slug: &str) -> Result<&Product, CatalogError> {
        self.by_slug(slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_owned()))
    }

    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.filtered(|p| p.category == category)
    }

    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.filtered(|p| p.featured)
    }

    #[must_use]
    pub fn bestsellers(&self) -> Vec<&Product> {
        self.filtered(|p| p.bestseller)
    }

    #[must_use]
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.filtered(|p| p.new_arrival)
    }

    /// Other products in the same category, in catalog order, at most `limit`.
    ///
    /// Returns an empty list for unknown IDs.
    #[must_use]
    pub fn related(&self, id: &ProductId, limit: usize) -> Vec<&Product> {
        let Some(current) = self.by_id(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.id != current.id && p.category == current.category)
            .take(limit)
            .collect()
    }

    /// Apply a listing query: filter, then sort.
    #[must_use]
    pub fn browse(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut products = self.filtered(|p| query.matches(p));
        query.sort.apply(&mut products);
        products
    }

    fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<&Product> {
        self.products.iter().filter(|p| predicate(p)).collect()
    }
}
