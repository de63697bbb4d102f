//! Application state shared across consumers.

use erasto_core::{LineSelection, Product};

use crate::cart::{CartEvent, CartStore, FileStorage, SnapshotStorage};
use crate::catalog::{Catalog, ProductQuery};
use crate::config::StorefrontConfig;
use crate::error::Result;

/// Application state, built once at the composition root and handed to
/// every consumer.
///
/// Consumers read the cart through [`AppState::cart`] and change it only
/// through the store's operations via [`AppState::cart_mut`].
#[derive(Debug)]
pub struct AppState<S: SnapshotStorage = FileStorage> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore<S>,
}

impl AppState<FileStorage> {
    /// Create application state with the cart persisted under
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog is corrupt or the configured
    /// cart key is invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.data_dir);
        Self::with_storage(config, storage)
    }
}

impl<S: SnapshotStorage> AppState<S> {
    /// Create application state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Same as [`AppState::new`].
    pub fn with_storage(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = Catalog::builtin()?;
        let cart = CartStore::open_with_key(storage, &config.cart_key)?;

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.line_count(),
            hydration = ?cart.hydration(),
            "Storefront state ready"
        );

        Ok(Self {
            config,
            catalog,
            cart,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only access to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Mutable access to the cart, for calling its operations.
    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Listing query with the configured default price ceiling.
    #[must_use]
    pub fn default_query(&self) -> ProductQuery {
        ProductQuery::with_price_ceiling(self.config.price_ceiling)
    }

    /// Related products for a product page, up to the configured limit.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.catalog.related(&product.id, self.config.related_limit)
    }

    /// Add the product with the given slug to the cart, as the product page's
    /// "Add to cart" button does.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is unknown or the selection is not valid
    /// for the product.
    pub fn add_to_cart(&mut self, slug: &str, selection: &LineSelection) -> Result<CartEvent> {
        let item = self.catalog.require_slug(slug)?.line_item(selection)?;
        Ok(self.cart.add(item))
    }
}
