//! Remote product catalog client.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth - no local sync, direct calls
//! - In-memory caching via `moka` for list responses (5 minute TTL by default)
//! - Every list endpoint answers with a `{ "data": [...] }` envelope
//!
//! # Endpoints
//!
//! - `GET {base}/products?limit=N` - unfiltered product sample
//! - `GET {base}/products/category/{slug}?limit=N` - products in one category
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_storefront::catalog::{CatalogClient, ProductQuery};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let sample = client.fetch_products(&ProductQuery::limit(120)).await?;
//! let shoes = client.fetch_products_by_category("shoes", &ProductQuery::limit(60)).await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("{}", format_status(.status, .message.as_deref()))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot address the requested endpoint.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The API token cannot be sent as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

/// Prefer the API's own message; fall back to the bare status.
#[allow(clippy::trivially_copy_pass_by_ref)] // thiserror passes fields by reference
fn format_status(status: &u16, message: Option<&str>) -> String {
    match message.map(str::trim) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => format!("Catalog returned HTTP {status}"),
    }
}
