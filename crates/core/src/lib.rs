//! F&A Portfolio Core - Shared types library.
//!
//! This crate provides common types used across all portfolio components:
//! - `storefront` - Catalog, cart store and checkout link builder
//! - `cli` - Command-line front end for browsing and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! configuration loading. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, categories, prices and
//!   messaging destinations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
