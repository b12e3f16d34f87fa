//! Product route handlers.
//!
//! The listing page mounts once: its results fragment fetches the product
//! list, keeps it in the session, and every later keystroke or category
//! change re-filters that copy without going back to the backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pharmaconnect_core::{CATEGORIES, Category, Product, ProductFilter, ProductId, ViewError};

use crate::error::{AppError, PageResult, Result, ViewContext, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Search and category query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
}

impl From<FilterQuery> for ProductFilter {
    fn from(query: FilterQuery) -> Self {
        Self::new(query.q, Category::from(query.category))
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub categories: &'static [&'static str],
}

/// Filtered product grid fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the mounted product list from the session.
async fn get_mounted(session: &Session) -> Option<Vec<Product>> {
    session
        .get::<Vec<Product>>(session_keys::CATALOG_PRODUCTS)
        .await
        .map_err(|e| tracing::warn!("Failed to read product list from session: {e}"))
        .ok()
        .flatten()
}

/// Store the mounted product list in the session.
async fn set_mounted(session: &Session, products: &[Product]) {
    if let Err(e) = session
        .insert(session_keys::CATALOG_PRODUCTS, products)
        .await
    {
        tracing::warn!("Failed to store product list in session: {e}");
    }
}

/// Forget the mounted product list.
async fn clear_mounted(session: &Session) {
    if let Err(e) = session
        .remove::<Vec<Product>>(session_keys::CATALOG_PRODUCTS)
        .await
    {
        tracing::warn!("Failed to clear product list from session: {e}");
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
///
/// Opening the page discards whatever list an earlier visit mounted.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    clear_mounted(&session).await;

    ProductsIndexTemplate {
        categories: CATEGORIES,
    }
}

/// Render the filtered product grid.
#[instrument(skip(state, session))]
pub async fn results(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<FilterQuery>,
) -> Result<ProductGridTemplate> {
    let products = if let Some(products) = get_mounted(&session).await {
        products
    } else {
        let products = state
            .catalog()
            .list_products()
            .await
            .or_view(ViewError::FetchProducts)?;
        set_mounted(&session, &products).await;
        products
    };

    let filter = ProductFilter::from(query);
    let products = filter
        .apply(&products)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductGridTemplate { products })
}

/// Display product detail page.
///
/// Failures render inside the site layout.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<ProductShowTemplate> {
    let id = ProductId::new(id);

    let products = state
        .catalog()
        .list_products()
        .await
        .or_view(ViewError::FetchProducts)?;

    let product = products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    add_breadcrumb("navigation", &format!("Viewed product {id}"));

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pharmaconnect_core::Price;

    #[test]
    fn test_product_view_formats_price() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Saline Spray".to_string(),
            description: "Nasal".to_string(),
            price: Price::parse("6.5").unwrap(),
            category: "Allergy".to_string(),
            image: "https://img.example/saline.png".to_string(),
        };

        let view = ProductView::from(&product);
        assert_eq!(view.id, "p1");
        assert_eq!(view.price, "$6.50");
    }

    #[test]
    fn test_filter_query_defaults_to_everything() {
        let filter = ProductFilter::from(FilterQuery::default());
        assert_eq!(filter, ProductFilter::new("", Category::All));
    }

    #[test]
    fn test_grid_template_renders_empty_message() {
        let html = ProductGridTemplate { products: vec![] }.render().unwrap();
        assert!(html.contains("No products found"));
    }
}
