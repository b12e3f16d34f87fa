//! Client for the PharmaConnect REST backend.
//!
//! Every response is wrapped in a `{ "data": ... }` envelope. Mutating calls
//! whose payload the console never reads only check the status code.

use std::sync::Arc;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};
use urlencoding::encode;

use pharmaconnect_core::{
    Envelope, NewProduct, Order, OrderId, Pharmacist, PharmacistId, Product, ProductId,
    ReviewAction,
};

use crate::config::BackendConfig;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected envelope.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Id cannot be used as a path segment.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
}

/// Percent-encode `id` as a single path segment.
///
/// `.` and `..` are refused; URL parsing resolves them.
fn segment(id: &str) -> Result<String, BackendError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(BackendError::InvalidId(id.to_string()));
    }
    Ok(encode(id).into_owned())
}

/// Body of the approve/reject requests.
#[derive(Debug, Serialize)]
struct ReviewBody {
    action: ReviewAction,
}

/// Client with full access to orders, products and pharmacists.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    api_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pharmaconnect-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                api_url: config.api_url.clone(),
            }),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// List every order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the envelope cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, BackendError> {
        let orders: Vec<Order> = self.fetch(Method::GET, "orders/getAllOrders", None::<&()>).await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the envelope cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let products: Vec<Product> = self
            .fetch(Method::GET, "products/getAllProduct", None::<&()>)
            .await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// List every pharmacist account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the envelope cannot be decoded.
    #[instrument(skip(self))]
    pub async fn list_pharmacists(&self) -> Result<Vec<Pharmacist>, BackendError> {
        let pharmacists: Vec<Pharmacist> = self
            .fetch(Method::GET, "pharmacists/getAllPharmacists", None::<&()>)
            .await?;
        debug!(count = pharmacists.len(), "Fetched pharmacists");
        Ok(pharmacists)
    }

    // =========================================================================
    // Moderation
    // =========================================================================

    /// Approve or reject an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn review_order(&self, id: &OrderId, action: ReviewAction) -> Result<(), BackendError> {
        self.send(
            Method::PATCH,
            &format!("orders/approveOrder/{}", segment(id.as_str())?),
            Some(&ReviewBody { action }),
        )
        .await
    }

    /// Approve or reject a pharmacist account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(pharmacist_id = %id))]
    pub async fn review_pharmacist(
        &self,
        id: &PharmacistId,
        action: ReviewAction,
    ) -> Result<(), BackendError> {
        self.send(
            Method::PATCH,
            &format!("pharmacists/approvePharmacist/{}", segment(id.as_str())?),
            Some(&ReviewBody { action }),
        )
        .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the created product cannot be
    /// decoded.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: &NewProduct) -> Result<Product, BackendError> {
        let created: Product = self
            .fetch(Method::POST, "products/addProduct", Some(product))
            .await?;
        debug!(product_id = %created.id, "Created product");
        Ok(created)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError> {
        self.send(
            Method::DELETE,
            &format!("products/deleteProduct/{}", segment(id.as_str())?),
            None::<&()>,
        )
        .await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Issue a request and unwrap the `{ data }` envelope of the response.
    async fn fetch<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.execute(method, path, body).await?;

        match serde_json::from_str::<Envelope<T>>(&text) {
            Ok(envelope) => Ok(envelope.into_inner()),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse backend response"
                );
                Err(BackendError::Parse(e))
            }
        }
    }

    /// Issue a request and only check that it succeeded.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), BackendError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, body).await.map(drop)
    }

    async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{path}", self.inner.api_url);

        let mut request = self.inner.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_review_body_shape() {
        let body = serde_json::to_value(ReviewBody {
            action: ReviewAction::Reject,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "action": "reject" }));
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 404,
            message: "no such order".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - no such order");
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment("p1").unwrap(), "p1");
        assert_eq!(segment("p1?x").unwrap(), "p1%3Fx");
        assert_eq!(segment("a/b#c").unwrap(), "a%2Fb%23c");
        assert_eq!(segment("../orders").unwrap(), "..%2Forders");
    }

    #[test]
    fn test_segment_refuses_dot_segments() {
        assert!(matches!(segment(".."), Err(BackendError::InvalidId(_))));
        assert!(matches!(segment("."), Err(BackendError::InvalidId(_))));
        assert!(matches!(segment(""), Err(BackendError::InvalidId(_))));
    }
}
