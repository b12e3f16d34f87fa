//! Integration tests for the public storefront.

use pharmaconnect_integration_tests::{
    Endpoint, FakeBackend, client, get, occurrences, spawn_storefront,
};
use reqwest::StatusCode;

const CARD: &str = "View Details";

// ============================================================================
// Home
// ============================================================================

#[tokio::test]
async fn test_home_shell_then_featured() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;
    let client = client();

    let (status, html) = get(&client, &format!("{storefront}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Loading..."));
    assert!(backend.calls().is_empty());

    let (status, html) = get(&client, &format!("{storefront}/home/featured")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Paracetamol 500mg"));
    assert!(html.contains("Ibuprofen 200mg"));
    // Only the first four are featured
    assert!(!html.contains("Hand Sanitizer"));
}

#[tokio::test]
async fn test_featured_with_fewer_products_shows_all() {
    let products = pharmaconnect_integration_tests::seed_products()
        .into_iter()
        .take(2)
        .collect();
    let backend = FakeBackend::spawn_with(vec![], products, vec![]).await;
    let storefront = spawn_storefront(&backend).await;

    let (_, html) = get(&client(), &format!("{storefront}/home/featured")).await;
    assert!(html.contains("Paracetamol 500mg"));
    assert!(html.contains("Vitamin C 1000mg"));
}

#[tokio::test]
async fn test_featured_failure_shows_message() {
    let backend = FakeBackend::spawn().await;
    backend.fail(Endpoint::ListProducts);
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/home/featured")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error fetching products"));
}

// ============================================================================
// Product list
// ============================================================================

#[tokio::test]
async fn test_list_shell_has_filters() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Loading..."));
    assert!(html.contains("<option value=\"All\">All</option>"));
    assert!(html.contains("<option value=\"Pain Relief\">Pain Relief</option>"));
}

#[tokio::test]
async fn test_filtering_reuses_mounted_list() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;
    let client = client();

    get(&client, &format!("{storefront}/products")).await;

    let (_, html) = get(&client, &format!("{storefront}/products/results")).await;
    assert_eq!(occurrences(&html, CARD), 5);

    // Search matches name or category, case-insensitively
    let (_, html) = get(&client, &format!("{storefront}/products/results?q=VITAMIN")).await;
    assert_eq!(occurrences(&html, CARD), 1);
    assert!(html.contains("Vitamin C 1000mg"));

    let (_, html) = get(
        &client,
        &format!("{storefront}/products/results?q=&category=Pain%20Relief"),
    )
    .await;
    assert_eq!(occurrences(&html, CARD), 2);

    let (_, html) = get(
        &client,
        &format!("{storefront}/products/results?q=ibu&category=Pain%20Relief"),
    )
    .await;
    assert_eq!(occurrences(&html, CARD), 1);
    assert!(html.contains("Ibuprofen 200mg"));

    assert_eq!(backend.count(Endpoint::ListProducts), 1);
}

#[tokio::test]
async fn test_no_match_shows_empty_message() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;
    let client = client();

    get(&client, &format!("{storefront}/products")).await;
    let (_, html) = get(
        &client,
        &format!("{storefront}/products/results?q=aspirin&category=Allergy"),
    )
    .await;

    assert!(html.contains("No products found"));
    assert_eq!(occurrences(&html, CARD), 0);
}

#[tokio::test]
async fn test_reopening_list_refetches() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;
    let client = client();

    get(&client, &format!("{storefront}/products")).await;
    get(&client, &format!("{storefront}/products/results")).await;
    get(&client, &format!("{storefront}/products")).await;
    get(&client, &format!("{storefront}/products/results")).await;

    assert_eq!(backend.count(Endpoint::ListProducts), 2);
}

#[tokio::test]
async fn test_list_failure_shows_message() {
    let backend = FakeBackend::spawn().await;
    backend.fail(Endpoint::ListProducts);
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/products/results")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error fetching products"));
    assert_eq!(occurrences(&html, CARD), 0);
}

// ============================================================================
// Product detail
// ============================================================================

#[tokio::test]
async fn test_product_detail() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/productdetails/p3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Cetirizine 10mg"));
    assert!(html.contains("$6.25"));
}

#[tokio::test]
async fn test_product_detail_not_found() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/productdetails/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Product not found"));
    assert!(html.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_product_detail_failure_keeps_layout() {
    let backend = FakeBackend::spawn().await;
    backend.fail(Endpoint::ListProducts);
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = get(&client(), &format!("{storefront}/productdetails/p3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Error fetching products"));
    assert!(!html.contains("Cetirizine"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let backend = FakeBackend::spawn().await;
    let storefront = spawn_storefront(&backend).await;

    let response = client()
        .get(format!("{storefront}/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-me")
    );
}
