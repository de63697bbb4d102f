//! CLI command implementations.
//!
//! Each command writes its human-readable output to the given writer and
//! leaves logging to `tracing`, which goes to stderr.

pub mod cart;
pub mod catalog;
pub mod order;
