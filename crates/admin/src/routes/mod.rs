//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Health check
//!
//! # Dashboard
//! GET    /                         - Dashboard shell
//! GET    /dashboard/panel          - Mount orders, products, pharmacists (HTMX)
//! POST   /orders/:id/review        - Approve or reject an order (HTMX)
//! POST   /pharmacists/:id/review   - Approve or reject a pharmacist (HTMX)
//!
//! # Product admin
//! GET    /catalog                  - Product admin shell
//! GET    /catalog/panel            - Mount product list (HTMX)
//! POST   /catalog/products         - Add product (HTMX)
//! DELETE /catalog/products/:id     - Delete product (HTMX)
//! ```

pub mod catalog;
pub mod dashboard;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the product admin routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/panel", get(catalog::panel))
        .route("/products", post(catalog::create))
        .route("/products/{id}", delete(catalog::delete))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        .route("/dashboard/panel", get(dashboard::panel))
        .route("/orders/{id}/review", post(dashboard::review_order))
        .route("/pharmacists/{id}/review", post(dashboard::review_pharmacist))
        // Product admin
        .nest("/catalog", catalog_routes())
}
