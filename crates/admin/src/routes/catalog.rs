//! Product admin route handlers.
//!
//! The panel mounts the product list into the session. Adding a product
//! appends the record the backend returns and resets the form; deleting one
//! drops it from the list. Neither re-reads the backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use pharmaconnect_core::{Mirror, Product, ProductForm, ProductId, ViewError};

use crate::config::AdminConfig;
use crate::error::{Result, ViewContext, add_breadcrumb};
use crate::filters;
use crate::models::CatalogView;
use crate::models::session::{self as view_state, keys};
use crate::state::AppState;

/// Product card shown on both admin views.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
    /// Storefront detail page for this product.
    pub edit_url: String,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, config: &AdminConfig) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            edit_url: config.product_url(product.id.as_str()),
        }
    }

    /// Cards for every product in a mirror, in order.
    #[must_use]
    pub fn all(products: &Mirror<Product>, config: &AdminConfig) -> Vec<Self> {
        products
            .items()
            .iter()
            .map(|product| Self::new(product, config))
            .collect()
    }
}

/// Product admin page shell.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate;

/// Add-product form and product list.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/panel.html")]
pub struct CatalogPanelTemplate {
    pub products: Vec<ProductCard>,
    pub form: ProductForm,
    pub form_error: Option<String>,
}

impl CatalogPanelTemplate {
    fn new(view: &CatalogView, config: &AdminConfig, form: ProductForm) -> Self {
        Self {
            products: ProductCard::all(&view.products, config),
            form,
            form_error: None,
        }
    }
}

/// Fetch the product list and store it as the mounted view.
async fn mount(state: &AppState, session: &Session) -> Result<CatalogView> {
    let products = state
        .backend()
        .list_products()
        .await
        .or_view(ViewError::FetchCatalog)?;

    let view = CatalogView {
        products: Mirror::new(products),
    };
    view_state::store(session, keys::CATALOG, &view).await;
    Ok(view)
}

/// The mounted view, mounting it first when the session has none.
async fn mounted(state: &AppState, session: &Session) -> Result<CatalogView> {
    match view_state::load::<CatalogView>(session, keys::CATALOG).await {
        Some(view) => Ok(view),
        None => {
            tracing::debug!("No mounted catalog view, mounting before action");
            mount(state, session).await
        }
    }
}

/// Display the product admin page shell.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    view_state::forget(&session, keys::CATALOG).await;
    CatalogTemplate
}

/// Mount the product admin panel.
#[instrument(skip(state, session))]
pub async fn panel(State(state): State<AppState>, session: Session) -> Result<CatalogPanelTemplate> {
    let view = mount(&state, &session).await?;
    Ok(CatalogPanelTemplate::new(
        &view,
        state.config(),
        ProductForm::default(),
    ))
}

/// Add a product and append it to the list.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<CatalogPanelTemplate> {
    let mut view = mounted(&state, &session).await?;

    let new_product = match form.validate() {
        Ok(product) => product,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected add-product form");
            return Ok(CatalogPanelTemplate {
                form_error: Some(e.to_string()),
                ..CatalogPanelTemplate::new(&view, state.config(), form)
            });
        }
    };

    let created = state
        .backend()
        .add_product(&new_product)
        .await
        .or_view(ViewError::AddProduct)?;

    add_breadcrumb("catalog", &format!("Added product {}", created.id));
    view.products.push(created);
    view_state::store(&session, keys::CATALOG, &view).await;

    Ok(CatalogPanelTemplate::new(
        &view,
        state.config(),
        ProductForm::default(),
    ))
}

/// Delete a product and drop it from the list.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<CatalogPanelTemplate> {
    let id = ProductId::new(id);
    let mut view = mounted(&state, &session).await?;

    state
        .backend()
        .delete_product(&id)
        .await
        .or_view(ViewError::DeleteProduct)?;

    add_breadcrumb("catalog", &format!("Deleted product {id}"));
    if view.products.remove(&id).is_none() {
        tracing::debug!(product_id = %id, "Deleted product was not in the mounted list");
    }
    view_state::store(&session, keys::CATALOG, &view).await;

    Ok(CatalogPanelTemplate::new(
        &view,
        state.config(),
        ProductForm::default(),
    ))
}
