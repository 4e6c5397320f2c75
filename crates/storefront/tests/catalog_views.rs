//! Integration tests for the catalog-backed views.
//!
//! These tests run the real `CatalogClient` against a local axum stub of the
//! catalog API bound to an ephemeral port.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bazaar_storefront::catalog::CatalogClient;
use bazaar_storefront::categories::FALLBACK_CATEGORY_IMAGE;
use bazaar_storefront::config::CatalogConfig;
use bazaar_storefront::fetch::FetchState;
use bazaar_storefront::views::category::CATEGORY_EMPTY_MESSAGE;
use bazaar_storefront::views::{CategoriesSection, CategoryPage, ListDisplay};
use serde_json::json;
use url::Url;

// =============================================================================
// Catalog Stub
// =============================================================================

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<AtomicUsize>,
}

async fn products(State(state): State<StubState>) -> Json<serde_json::Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "data": [
            {"id": 1, "name": "Runner", "price": 2499, "category": "Shoes", "image": "https://cdn.example.com/1.png"},
            {"id": 2, "name": "Loafer", "price": 1999, "category": "shoes ", "gallery": ["https://cdn.example.com/2.png"]},
            {"id": 3, "name": "Mystery", "price": 99, "category": ""},
            {"id": 4, "name": "Tote", "price": "899.50"},
            {"id": 5, "name": "Boot", "price": 3999, "category": "Shoes", "image": "https://cdn.example.com/5.png"}
        ]
    }))
}

async fn by_category(State(state): State<StubState>, Path(slug): Path<String>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    match slug.as_str() {
        "slow-bags" => {
            tokio::time::sleep(Duration::from_millis(400)).await;
            Json(json!({"data": [{"id": 10, "name": "Stale Bag", "price": 10, "category": "Bags"}]}))
                .into_response()
        }
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Catalog offline"})),
        )
            .into_response(),
        "silent" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "empty" => Json(json!({"data": []})).into_response(),
        other => Json(json!({
            "data": [{"id": 20, "name": format!("{other} item"), "price": 20, "category": other}]
        }))
        .into_response(),
    }
}

async fn spawn_catalog() -> (CatalogClient, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/api/products", get(products))
        .route("/api/products/category/{slug}", get(by_category))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = CatalogClient::new(&CatalogConfig {
        base_url: Url::parse(&format!("http://{addr}/api")).unwrap(),
        api_token: None,
        cache_ttl: Duration::from_secs(300),
    })
    .unwrap();
    (client, state)
}

// =============================================================================
// Categories Section
// =============================================================================

#[tokio::test]
async fn test_categories_section_summarizes_sample() {
    let (catalog, _) = spawn_catalog().await;
    let section = CategoriesSection::new(120);

    assert!(section.load(&catalog).await);

    let ListDisplay::Ready(summaries) = section.display() else {
        panic!("expected categories, got {:?}", section.display());
    };
    let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Shoes", "shoes", "Other"]);
    assert_eq!(summaries[0].image, "https://cdn.example.com/1.png");
    assert_eq!(summaries[1].image, "https://cdn.example.com/2.png");
    assert_eq!(summaries[2].image, FALLBACK_CATEGORY_IMAGE);
}

#[tokio::test]
async fn test_categories_section_loads_once_per_mount() {
    let (catalog, stub) = spawn_catalog().await;
    let section = CategoriesSection::new(120);

    assert!(section.load(&catalog).await);
    assert!(!section.load(&catalog).await);
    assert_eq!(stub.requests.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Category Page
// =============================================================================

#[tokio::test]
async fn test_slow_stale_category_never_replaces_current() {
    let (catalog, _) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    let (stale_applied, current_applied) = tokio::join!(
        page.show(&catalog, "slow-bags"),
        page.show(&catalog, "shoes"),
    );

    assert!(!stale_applied);
    assert!(current_applied);
    assert_eq!(page.title().as_deref(), Some("Shoes"));
    let state = page.state();
    assert_eq!(state.data().len(), 1);
    assert_eq!(state.data()[0].name, "shoes item");
}

#[tokio::test]
async fn test_failure_surfaces_api_message() {
    let (catalog, _) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    assert!(page.show(&catalog, "broken").await);
    assert_eq!(page.display(), ListDisplay::Failed("Catalog offline".to_string()));
    assert!(page.state().data().is_empty());
}

#[tokio::test]
async fn test_failure_without_message_reports_status() {
    let (catalog, _) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    page.show(&catalog, "silent").await;
    assert_eq!(
        page.state(),
        FetchState::Error("Catalog returned HTTP 503".to_string())
    );
}

#[tokio::test]
async fn test_empty_category_is_not_an_error() {
    let (catalog, _) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    page.show(&catalog, "empty").await;
    assert_eq!(page.display(), ListDisplay::Empty(CATEGORY_EMPTY_MESSAGE));
}

#[tokio::test]
async fn test_failed_category_retries_only_on_key_change() {
    let (catalog, stub) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    page.show(&catalog, "broken").await;
    assert!(!page.show(&catalog, "broken").await);
    assert_eq!(stub.requests.load(Ordering::SeqCst), 1);

    assert!(page.show(&catalog, "hats").await);
    assert_eq!(page.state().data()[0].name, "hats item");
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let (catalog, _) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    let (applied, ()) = tokio::join!(page.show(&catalog, "slow-bags"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        page.teardown();
    });

    assert!(!applied);
    assert!(page.state().is_loading());
    assert!(page.title().is_none());
}

#[tokio::test]
async fn test_revisiting_category_is_served_from_cache() {
    let (catalog, stub) = spawn_catalog().await;
    let page = CategoryPage::new(60);

    page.show(&catalog, "hats").await;
    page.show(&catalog, "caps").await;
    page.show(&catalog, "hats").await;

    assert_eq!(stub.requests.load(Ordering::SeqCst), 2);
    assert_eq!(page.state().data()[0].name, "hats item");
}
