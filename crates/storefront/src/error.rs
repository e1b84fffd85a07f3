//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends. Each module keeps its
//! own error enum; `AppError` wraps them so a caller can use `?` across
//! configuration, catalog and cart operations.
//!
//! Corrupt or missing cart storage and cart lines for unknown products are
//! not errors: they are recovered where they are read.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Requested product or category does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input could not be parsed.
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
            Self::NotFound(_) | Self::BadRequest(_) | Self::Cart(CartError::InvalidQuantity(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
