//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything a storefront consumer can
//! fail on. The cart store itself never returns errors; these come from
//! configuration, catalog lookups and product selection.

use erasto_core::SelectionError;
use thiserror::Error;

use crate::cart::StorageError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot storage could not be set up.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded or a product was not found.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product page selection was rejected.
    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error was caused by user input rather than the
    /// environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Selection(_) | Self::BadRequest(_) | Self::Catalog(CatalogError::NotFound(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
