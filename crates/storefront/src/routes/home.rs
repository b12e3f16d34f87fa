//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use pharmaconnect_core::{ViewError, featured as featured_products};

use crate::error::{Result, ViewContext};
use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Static hero banner content.
#[derive(Clone)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub button_url: &'static str,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "Your Trusted Pharmacy",
            subtitle: "Fast delivery, genuine products, and exceptional service.",
            button_text: "Shop Now",
            button_url: "/products",
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: Hero,
}

/// Featured products fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/featured.html")]
pub struct FeaturedTemplate {
    pub products: Vec<ProductView>,
}

/// Display the home page shell.
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        hero: Hero::default(),
    }
}

/// Render the featured products row.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<FeaturedTemplate> {
    let products = state
        .catalog()
        .list_products()
        .await
        .or_view(ViewError::FetchProducts)?;

    Ok(FeaturedTemplate {
        products: featured_products(&products)
            .iter()
            .map(ProductView::from)
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_home_renders_loading_placeholder() {
        let html = HomeTemplate {
            hero: Hero::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Your Trusted Pharmacy"));
        assert!(html.contains("Loading..."));
        assert!(html.contains("hx-get=\"/home/featured\""));
    }
}
