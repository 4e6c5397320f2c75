//! Catalog browsing commands.
//!
//! Each command drives the same view model the storefront renders and turns
//! its final display state into plain text.

use std::fmt::Write as _;

use bazaar_core::CurrencyCode;
use bazaar_storefront::catalog::Product;
use bazaar_storefront::categories::CategorySummary;
use bazaar_storefront::error::AppError;
use bazaar_storefront::state::AppState;
use bazaar_storefront::views::{CategoriesSection, CategoryPage, ListDisplay};

use super::CommandError;

/// Show the categories strip.
///
/// # Errors
///
/// Returns `CommandError::Load` if the product sample could not be fetched.
pub async fn categories(state: &AppState) -> Result<String, CommandError> {
    let section = CategoriesSection::new(state.config().category_sample_limit);
    section.load(state.catalog()).await;

    let summaries = settled(section.display())?;
    Ok(render_categories(&summaries))
}

/// Show the category page for `slug`.
///
/// # Errors
///
/// Returns `AppError::NotFound` for a blank slug and `CommandError::Load`
/// if the category could not be fetched.
pub async fn category(state: &AppState, slug: &str) -> Result<String, CommandError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(AppError::NotFound("category with an empty slug".to_string()).into());
    }

    let page = CategoryPage::new(state.config().category_page_limit);
    page.show(state.catalog(), slug).await;

    let title = page.title().unwrap_or_else(|| slug.to_string());
    let products = settled(page.display())?;
    Ok(render_category(&title, &products, state.config().currency))
}

/// Rows to print: the items, or the empty message as a single line.
enum Rows<T> {
    Items(Vec<T>),
    Empty(&'static str),
}

fn settled<T>(display: ListDisplay<T>) -> Result<Rows<T>, CommandError> {
    match display {
        ListDisplay::Ready(items) => Ok(Rows::Items(items)),
        ListDisplay::Empty(message) => Ok(Rows::Empty(message)),
        ListDisplay::Failed(message) => Err(CommandError::Load(message)),
        ListDisplay::Loading => {
            Err(AppError::Internal("list fetch finished without a result".to_string()).into())
        }
    }
}

fn render_categories(rows: &Rows<CategorySummary>) -> String {
    let mut out = String::new();
    match rows {
        Rows::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        Rows::Items(summaries) => {
            for summary in summaries {
                let _ = writeln!(
                    out,
                    "{:<24} /category/{:<20} {}",
                    summary.name,
                    summary.slug(),
                    summary.image
                );
            }
        }
    }
    out
}

fn render_category(title: &str, rows: &Rows<Product>, currency: CurrencyCode) -> String {
    let mut out = format!("{title}\n");
    match rows {
        Rows::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        Rows::Items(products) => {
            for product in products {
                let _ = writeln!(
                    out,
                    "#{:<6} {:<40} {:>14}",
                    product.id.as_i64(),
                    product.name,
                    product.price.display(currency)
                );
            }
        }
    }
    out
}
