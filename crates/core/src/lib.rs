//! Erasto Core - Shared types library.
//!
//! This crate provides the domain types used across the Erasto Coffee
//! storefront components:
//! - `storefront` - Cart store, catalog queries and configuration
//! - `cli` - Command-line consumer of the cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no logging. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog products, cart line items and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
