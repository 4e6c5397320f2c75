//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and caches successful list responses with `moka`.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use crate::catalog::CatalogError;
use crate::catalog::types::{ErrorBody, Product, ProductList, ProductQuery};
use crate::config::CatalogConfig;

/// Maximum number of cached list responses.
const CACHE_CAPACITY: u64 = 1000;

/// Client for the catalog API.
///
/// Cheaply cloneable; clones share the connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Fetch an unfiltered product sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products"], query)?;
        self.get_list(url).await
    }

    /// Fetch products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_products_by_category(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products", "category", slug], query)?;
        self.get_list(url).await
    }

    /// Build an endpoint URL below the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &ProductQuery) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// GET a list endpoint, serving from cache when possible.
    async fn get_list(&self, url: Url) -> Result<Vec<Product>, CatalogError> {
        let cache_key = url.to_string();
        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!(url = %cache_key, "Catalog cache hit");
            return Ok(products);
        }

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let list: ProductList = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })?;

        debug!(url = %cache_key, count = list.data.len(), "Catalog list fetched");
        self.inner.cache.insert(cache_key, list.data.clone()).await;
        Ok(list.data)
    }
}
