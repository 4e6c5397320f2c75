//! Domain types for the catalog API.

use bazaar_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product as served by the catalog.
///
/// Only `id`, `name` and `price` are guaranteed; everything else may be
/// missing or `null` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Primary image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Additional image URLs, in display order.
    #[serde(default)]
    pub gallery: Option<Vec<String>>,
    /// Free-form category label, e.g. `"Shoes"`.
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Create a product with no image, gallery or category.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
            gallery: None,
            category: None,
        }
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the primary image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the gallery images.
    #[must_use]
    pub fn with_gallery<I, S>(mut self, gallery: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gallery = Some(gallery.into_iter().map(Into::into).collect());
        self
    }
}

/// Query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Maximum number of products to return.
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Query capped at `limit` products.
    #[must_use]
    pub const fn limit(limit: u32) -> Self {
        Self { limit: Some(limit) }
    }

    /// Query-string pairs for this query.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.limit
            .map(|limit| ("limit", limit.to_string()))
            .into_iter()
            .collect()
    }
}

/// Response envelope for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    /// Products in this response.
    pub data: Vec<Product>,
}

/// Error body returned by the catalog on failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
