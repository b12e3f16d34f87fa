//! Dashboard route handlers.
//!
//! The dashboard shows orders, products and pharmacists side by side.
//! Approving a record marks it `Approved` in the mounted view; rejecting it
//! drops it. Both happen only after the backend accepts the request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pharmaconnect_core::{
    Mirror, Order, OrderId, Pharmacist, PharmacistId, ReviewAction, ReviewOutcome, ViewError,
};

use crate::config::AdminConfig;
use crate::error::{Result, ViewContext, add_breadcrumb};
use crate::filters;
use crate::models::DashboardView;
use crate::models::session::{self as view_state, keys};
use crate::routes::catalog::ProductCard;
use crate::state::AppState;

/// Body of the approve/reject buttons.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub action: ReviewAction,
}

/// Dashboard page shell.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate;

/// Order, product and pharmacist sections.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/panel.html")]
pub struct DashboardPanelTemplate {
    pub orders: Vec<Order>,
    pub products: Vec<ProductCard>,
    pub pharmacists: Vec<Pharmacist>,
}

impl DashboardPanelTemplate {
    fn new(view: &DashboardView, config: &AdminConfig) -> Self {
        Self {
            orders: view.orders.items().to_vec(),
            products: ProductCard::all(&view.products, config),
            pharmacists: view.pharmacists.items().to_vec(),
        }
    }
}

/// Fetch all three collections, one after another, and store them as the
/// mounted view.
///
/// Any failed read fails the whole mount.
async fn mount(state: &AppState, session: &Session) -> Result<DashboardView> {
    let backend = state.backend();

    let orders = backend
        .list_orders()
        .await
        .or_view(ViewError::FetchDashboard)?;
    let products = backend
        .list_products()
        .await
        .or_view(ViewError::FetchDashboard)?;
    let pharmacists = backend
        .list_pharmacists()
        .await
        .or_view(ViewError::FetchDashboard)?;

    let view = DashboardView {
        orders: Mirror::new(orders),
        products: Mirror::new(products),
        pharmacists: Mirror::new(pharmacists),
    };
    view_state::store(session, keys::DASHBOARD, &view).await;
    Ok(view)
}

/// The mounted view, mounting it first when the session has none.
async fn mounted(state: &AppState, session: &Session) -> Result<DashboardView> {
    match view_state::load::<DashboardView>(session, keys::DASHBOARD).await {
        Some(view) => Ok(view),
        None => {
            tracing::debug!("No mounted dashboard view, mounting before action");
            mount(state, session).await
        }
    }
}

fn log_outcome(kind: &str, id: &str, outcome: ReviewOutcome) {
    if outcome == ReviewOutcome::Missing {
        tracing::debug!(kind, id, "Reviewed record was not in the mounted view");
    }
}

/// Display the dashboard shell.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    view_state::forget(&session, keys::DASHBOARD).await;
    DashboardTemplate
}

/// Mount the dashboard panel.
#[instrument(skip(state, session))]
pub async fn panel(
    State(state): State<AppState>,
    session: Session,
) -> Result<DashboardPanelTemplate> {
    let view = mount(&state, &session).await?;
    Ok(DashboardPanelTemplate::new(&view, state.config()))
}

/// Approve or reject an order.
#[instrument(skip(state, session), fields(action = %form.action))]
pub async fn review_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<DashboardPanelTemplate> {
    let id = OrderId::new(id);
    let mut view = mounted(&state, &session).await?;

    state
        .backend()
        .review_order(&id, form.action)
        .await
        .or_view(ViewError::UpdateOrder)?;

    add_breadcrumb("moderation", &format!("{} order {id}", form.action));
    let outcome = view.orders.apply_review(&id, form.action);
    log_outcome("order", id.as_str(), outcome);
    view_state::store(&session, keys::DASHBOARD, &view).await;

    Ok(DashboardPanelTemplate::new(&view, state.config()))
}

/// Approve or reject a pharmacist account.
#[instrument(skip(state, session), fields(action = %form.action))]
pub async fn review_pharmacist(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<DashboardPanelTemplate> {
    let id = PharmacistId::new(id);
    let mut view = mounted(&state, &session).await?;

    state
        .backend()
        .review_pharmacist(&id, form.action)
        .await
        .or_view(ViewError::UpdatePharmacist)?;

    add_breadcrumb("moderation", &format!("{} pharmacist {id}", form.action));
    let outcome = view.pharmacists.apply_review(&id, form.action);
    log_outcome("pharmacist", id.as_str(), outcome);
    view_state::store(&session, keys::DASHBOARD, &view).await;

    Ok(DashboardPanelTemplate::new(&view, state.config()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, SentryConfig};
    use pharmaconnect_core::{Price, ReviewStatus};

    fn config() -> AdminConfig {
        AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            storefront_url: "http://shop.test".to_string(),
            backend: BackendConfig::new("http://api.test").unwrap(),
            sentry: SentryConfig::default(),
        }
    }

    fn order(id: &str, status: ReviewStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: format!("Customer {id}"),
            total_amount: Price::parse("42").unwrap(),
            status,
        }
    }

    #[test]
    fn test_shell_shows_loading_placeholder() {
        let html = DashboardTemplate.render().unwrap();
        assert!(html.contains("Loading..."));
        assert!(html.contains("hx-get=\"/dashboard/panel\""));
    }

    #[test]
    fn test_panel_shows_actions_only_for_pending() {
        let view = DashboardView {
            orders: Mirror::new(vec![
                order("o1", ReviewStatus::Pending),
                order("o2", ReviewStatus::Approved),
            ]),
            ..DashboardView::default()
        };
        let html = DashboardPanelTemplate::new(&view, &config())
            .render()
            .unwrap();

        assert!(html.contains("Customer o1"));
        assert!(html.contains("$42.00"));
        assert!(html.contains("hx-post=\"/orders/o1/review\""));
        assert!(!html.contains("hx-post=\"/orders/o2/review\""));
        assert!(html.contains("Action not available"));
    }

    #[test]
    fn test_panel_offers_no_actions_without_status() {
        let view = DashboardView {
            orders: Mirror::new(vec![order("o7", ReviewStatus::default())]),
            ..DashboardView::default()
        };
        let html = DashboardPanelTemplate::new(&view, &config())
            .render()
            .unwrap();

        assert!(!html.contains("hx-post=\"/orders/o7/review\""));
        assert!(html.contains("Action not available"));
        assert!(!html.contains("Status: Pending"));
    }

    #[test]
    fn test_panel_encodes_ids_in_action_urls() {
        let view = DashboardView {
            orders: Mirror::new(vec![order("o1/x?y", ReviewStatus::Pending)]),
            ..DashboardView::default()
        };
        let html = DashboardPanelTemplate::new(&view, &config())
            .render()
            .unwrap();

        assert!(html.contains("hx-post=\"/orders/o1%2Fx%3Fy/review\""));
    }

    #[test]
    fn test_review_form_parses_action() {
        let form: ReviewForm = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(form.action, ReviewAction::Approve);
    }
}
