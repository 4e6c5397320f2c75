//! View models for the storefront surfaces.
//!
//! Each view owns the state it needs (a fetch controller, a cart reference)
//! and reduces it to something a renderer can draw without further logic.
//!
//! # Surfaces
//!
//! ```text
//! Home / categories strip   - CategoriesSection (product sample -> summaries)
//! /category/{slug}          - CategoryPage (products filtered by slug)
//! /cart                     - CartView (lines, totals, checkout hand-off)
//! ```

pub mod cart;
pub mod categories;
pub mod category;

pub use cart::{CartLineView, CartView};
pub use categories::CategoriesSection;
pub use category::CategoryPage;

use crate::fetch::FetchState;

/// How a fetched list should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDisplay<T> {
    /// Request pending (or not yet issued).
    Loading,
    /// Fetch failed; show the message.
    Failed(String),
    /// Fetch succeeded with no items; not an error.
    Empty(&'static str),
    /// Items to render.
    Ready(Vec<T>),
}

impl<T: Clone> ListDisplay<T> {
    /// Classify `state`, using `empty_message` for a successful empty result.
    #[must_use]
    pub fn from_state(state: &FetchState<T>, empty_message: &'static str) -> Self {
        match state {
            FetchState::Idle | FetchState::Loading => Self::Loading,
            FetchState::Error(message) => Self::Failed(message.clone()),
            FetchState::Success(items) if items.is_empty() => Self::Empty(empty_message),
            FetchState::Success(items) => Self::Ready(items.clone()),
        }
    }
}
