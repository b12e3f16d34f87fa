//! Records mirrored from the PharmaConnect REST backend.
//!
//! Field names follow the backend's JSON (camelCase, `_id` for identifiers).
//! Nothing here is validated: the console shows whatever the backend returns.

use serde::{Deserialize, Serialize};

use crate::types::{OrderId, PharmacistId, Price, ProductId, ReviewStatus};

/// The `{ "data": ... }` wrapper around every backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// A customer order awaiting or past moderation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub customer_name: String,
    pub total_amount: Price,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

/// A pharmacist account awaiting or past moderation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacist {
    #[serde(rename = "_id")]
    pub id: PharmacistId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// Body of the add-product request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image: String,
}
