//! Bazaar Storefront library.
//!
//! The behavioral core of the storefront UI, independent of any renderer:
//!
//! - [`cart`] - The cart aggregate: quantities, totals, checkout hand-off
//! - [`fetch`] - List-fetch lifecycle that discards stale responses
//! - [`categories`] - Category summaries derived from a product sample
//! - [`catalog`] - HTTP client for the remote product catalog
//! - [`views`] - View models combining the above for each surface
//!
//! # Architecture
//!
//! - One logical thread of control; fetches suspend only the task awaiting them
//! - The cart is an explicit [`cart::CartStore`] passed by reference, never ambient
//! - Fetch failures are folded into [`fetch::FetchState`], never returned to callers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod error;
pub mod fetch;
pub mod state;
pub mod views;
