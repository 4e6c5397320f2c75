//! Category page: products filtered by slug.

use tracing::instrument;

use crate::catalog::{CatalogClient, Product, ProductQuery};
use crate::categories::category_title;
use crate::fetch::{FetchState, ListFetchController};
use crate::views::ListDisplay;

/// Shown when the category fetch fails without a message.
pub const CATEGORY_FALLBACK_ERROR: &str = "Unable to load products for this category.";

/// Shown when a category has no products.
pub const CATEGORY_EMPTY_MESSAGE: &str = "No products found in this category yet.";

/// Product grid for the category selected in the route.
///
/// Navigating between categories re-keys the controller, so a slow response
/// for a previously selected slug never replaces the current grid.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    controller: ListFetchController<String, Product>,
    query: ProductQuery,
}

impl CategoryPage {
    /// Create a page fetching up to `page_limit` products.
    #[must_use]
    pub fn new(page_limit: u32) -> Self {
        Self {
            controller: ListFetchController::new("category-products", CATEGORY_FALLBACK_ERROR),
            query: ProductQuery::limit(page_limit),
        }
    }

    /// Show the category `slug`.
    ///
    /// Returns whether this call's outcome was applied; `false` when the slug
    /// was already shown or a later navigation superseded it.
    #[instrument(skip(self, catalog))]
    pub async fn show(&self, catalog: &CatalogClient, slug: &str) -> bool {
        let query = self.query;
        self.controller
            .load(slug.to_string(), |slug| async move {
                catalog.fetch_products_by_category(&slug, &query).await
            })
            .await
    }

    /// Heading for the current slug, e.g. `"Home Decor"`.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.controller.key().map(|slug| category_title(&slug))
    }

    /// Current fetch state.
    #[must_use]
    pub fn state(&self) -> FetchState<Product> {
        self.controller.state()
    }

    /// Render classification of the current state.
    #[must_use]
    pub fn display(&self) -> ListDisplay<Product> {
        ListDisplay::from_state(&self.controller.state(), CATEGORY_EMPTY_MESSAGE)
    }

    /// Underlying controller, for subscribing to transitions.
    #[must_use]
    pub const fn controller(&self) -> &ListFetchController<String, Product> {
        &self.controller
    }

    /// Unmount: any pending category result is discarded.
    pub fn teardown(&self) {
        self.controller.teardown();
    }
}
