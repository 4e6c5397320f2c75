//! "Shop from top categories" strip.

use tracing::instrument;

use crate::catalog::{CatalogClient, ProductQuery};
use crate::categories::{CategorySummary, summarize_categories};
use crate::fetch::{FetchState, ListFetchController};
use crate::views::ListDisplay;

/// Shown when the sample fetch fails without a message.
pub const CATEGORIES_FALLBACK_ERROR: &str = "Unable to load categories.";

/// Shown when the sample yields no categories.
pub const CATEGORIES_EMPTY_MESSAGE: &str = "No categories to display yet.";

/// Category strip backed by an unfiltered product sample.
///
/// The list has no parameters, so it loads once per mount.
#[derive(Debug, Clone)]
pub struct CategoriesSection {
    controller: ListFetchController<(), CategorySummary>,
    query: ProductQuery,
}

impl CategoriesSection {
    /// Create a section sampling `sample_limit` products.
    #[must_use]
    pub fn new(sample_limit: u32) -> Self {
        Self {
            controller: ListFetchController::new("categories", CATEGORIES_FALLBACK_ERROR),
            query: ProductQuery::limit(sample_limit),
        }
    }

    /// Fetch the sample and derive summaries. Does nothing once loaded.
    ///
    /// Returns whether the outcome was applied.
    #[instrument(skip(self, catalog))]
    pub async fn load(&self, catalog: &CatalogClient) -> bool {
        let query = self.query;
        self.controller
            .load((), |()| async move {
                catalog
                    .fetch_products(&query)
                    .await
                    .map(|products| summarize_categories(&products))
            })
            .await
    }

    /// Current fetch state.
    #[must_use]
    pub fn state(&self) -> FetchState<CategorySummary> {
        self.controller.state()
    }

    /// Render classification of the current state.
    #[must_use]
    pub fn display(&self) -> ListDisplay<CategorySummary> {
        ListDisplay::from_state(&self.controller.state(), CATEGORIES_EMPTY_MESSAGE)
    }

    /// Underlying controller, for subscribing to transitions.
    #[must_use]
    pub const fn controller(&self) -> &ListFetchController<(), CategorySummary> {
        &self.controller
    }

    /// Unmount: any pending sample result is discarded.
    pub fn teardown(&self) {
        self.controller.teardown();
    }
}
