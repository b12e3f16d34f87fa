//! View state mirrored from the backend.

pub mod session;

use serde::{Deserialize, Serialize};

use pharmaconnect_core::{Mirror, Order, Pharmacist, Product};

/// Collections shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardView {
    pub orders: Mirror<Order>,
    pub products: Mirror<Product>,
    pub pharmacists: Mirror<Pharmacist>,
}

/// Products shown on the product admin page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogView {
    pub products: Mirror<Product>,
}
