//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page shell
//! GET  /home/featured          - Featured products fragment (HTMX)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing shell
//! GET  /products/results       - Filtered product grid fragment (HTMX)
//! GET  /productdetails/:id     - Product detail
//! ```

pub mod home;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/results", get(products::results))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/home/featured", get(home::featured))
        // Product routes
        .nest("/products", product_routes())
        .route("/productdetails/{id}", get(products::show))
}
