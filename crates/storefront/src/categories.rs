//! Category summaries derived from a raw product sample.
//!
//! The catalog has no category endpoint, so the storefront derives the
//! "top categories" strip from an unfiltered product sample: one entry per
//! distinct category name, in first-seen order, capped at
//! [`MAX_CATEGORY_SUMMARIES`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Maximum number of summaries produced.
pub const MAX_CATEGORY_SUMMARIES: usize = 7;

/// Category assigned to products without one.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Image used when a product has neither an image nor a gallery.
pub const FALLBACK_CATEGORY_IMAGE: &str = "https://placehold.co/300x300/008ECC/FFFFFF.png?text=Category";

/// One category with a representative image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Trimmed, case-preserving category name.
    pub name: String,
    /// Image of the first product seen in this category.
    pub image: String,
}

impl CategorySummary {
    /// Slug used to link to the category page.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Summarize the categories present in `products`.
///
/// Names are trimmed but otherwise compared exactly, so `"Shoes"` and
/// `"shoes"` are distinct. The first product seen for a name decides its
/// image. Output keeps first-seen order and holds at most
/// [`MAX_CATEGORY_SUMMARIES`] entries.
#[must_use]
pub fn summarize_categories<'a, I>(products: I) -> Vec<CategorySummary>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut seen: IndexMap<String, String> = IndexMap::new();

    for product in products {
        let name = category_name(product);
        if name.is_empty() {
            continue;
        }
        if !seen.contains_key(name) {
            seen.insert(name.to_string(), representative_image(product).to_string());
        }
    }

    seen.into_iter()
        .take(MAX_CATEGORY_SUMMARIES)
        .map(|(name, image)| CategorySummary { name, image })
        .collect()
}

/// Trimmed category of `product`.
///
/// A missing or empty label becomes [`FALLBACK_CATEGORY`]. A whitespace-only
/// label trims to an empty name and the product is left out.
fn category_name(product: &Product) -> &str {
    product
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(FALLBACK_CATEGORY)
        .trim()
}

/// Product image, else first gallery image, else the placeholder.
fn representative_image(product: &Product) -> &str {
    product
        .image
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| {
            product
                .gallery
                .as_ref()
                .and_then(|gallery| gallery.first())
                .map(String::as_str)
                .filter(|url| !url.is_empty())
        })
        .unwrap_or(FALLBACK_CATEGORY_IMAGE)
}

/// Page heading for a category slug.
///
/// Hyphens become spaces and the first letter of every word is uppercased:
/// `"home-decor"` reads `"Home Decor"`.
#[must_use]
pub fn category_title(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut at_word_start = true;

    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && at_word_start {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = !is_word;
    }
    title
}
