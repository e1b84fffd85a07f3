//! Core types for the F&A portfolio.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod destination;
pub mod id;
pub mod price;

pub use category::{Category, CategoryParseError};
pub use destination::{DestinationId, DestinationIdError};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, CurrencyParseError, Price};
