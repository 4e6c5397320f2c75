//! Bazaar Core - Shared value types.
//!
//! This crate provides the value types used across the Bazaar workspace:
//! - `storefront` - Cart aggregate, catalog fetch lifecycle, category browsing
//! - `cli` - Command-line browsing against a live catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and currencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
