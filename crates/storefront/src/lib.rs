//! Erasto Coffee Storefront library.
//!
//! This crate provides the storefront's in-process core as a library: the
//! persisted cart, the static catalog and the glue consumers need to drive
//! them.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, snapshot storage backends and cart notifications
//! - [`catalog`] - Built-in product list, lookups, filters and sort orders
//! - [`orders`] - Order reference numbers and delivery estimates
//! - [`config`] - Environment configuration
//! - [`state`] - Application state built at the composition root

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
