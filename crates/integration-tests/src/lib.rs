//! Integration tests for PharmaConnect.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pharmaconnect-integration-tests
//! ```
//!
//! Each test starts a [`FakeBackend`] on an ephemeral port and points an
//! in-process storefront or admin server at it. Nothing outside the test
//! process is contacted.
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Home, product list filtering, product detail
//! - `admin_dashboard` - Mount and order/pharmacist moderation
//! - `admin_catalog` - Product add and delete

#![allow(clippy::missing_panics_doc, clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get as get_route, patch, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Backend endpoints the fake can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListOrders,
    ListProducts,
    ListPharmacists,
    ReviewOrder,
    ReviewPharmacist,
    AddProduct,
    DeleteProduct,
}

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: Endpoint,
    pub id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct FakeData {
    orders: Vec<Value>,
    products: Vec<Value>,
    pharmacists: Vec<Value>,
    failing: HashSet<Endpoint>,
    calls: Vec<Call>,
    next_id: u32,
}

/// In-process stand-in for the PharmaConnect REST backend.
///
/// Reads return the seeded records inside a `{ "data": ... }` envelope.
/// Writes are recorded but never change what later reads return, so a test
/// can tell an optimistic patch from a re-fetch.
#[derive(Clone)]
pub struct FakeBackend {
    url: String,
    data: Arc<Mutex<FakeData>>,
}

impl FakeBackend {
    /// Start a fake backend seeded with [`seed_orders`], [`seed_products`]
    /// and [`seed_pharmacists`].
    pub async fn spawn() -> Self {
        Self::spawn_with(seed_orders(), seed_products(), seed_pharmacists()).await
    }

    /// Start a fake backend with the given records.
    pub async fn spawn_with(orders: Vec<Value>, products: Vec<Value>, pharmacists: Vec<Value>) -> Self {
        let data = Arc::new(Mutex::new(FakeData {
            orders,
            products,
            pharmacists,
            ..FakeData::default()
        }));

        let router = Router::new()
            .route("/orders/getAllOrders", get_route(list_orders))
            .route("/products/getAllProduct", get_route(list_products))
            .route("/pharmacists/getAllPharmacists", get_route(list_pharmacists))
            .route("/orders/approveOrder/{id}", patch(review_order))
            .route("/pharmacists/approvePharmacist/{id}", patch(review_pharmacist))
            .route("/products/addProduct", post(add_product))
            .route("/products/deleteProduct/{id}", delete(delete_product))
            .with_state(Arc::clone(&data));

        let addr = serve(router).await;

        Self {
            url: format!("http://{addr}"),
            data,
        }
    }

    /// Base URL of the fake backend.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make every later call to `endpoint` answer `500`.
    pub fn fail(&self, endpoint: Endpoint) {
        self.lock().failing.insert(endpoint);
    }

    /// Undo [`FakeBackend::fail`].
    pub fn recover(&self, endpoint: Endpoint) {
        self.lock().failing.remove(&endpoint);
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// How many times `endpoint` was called.
    #[must_use]
    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, FakeData> {
        self.data.lock().expect("fake backend state poisoned")
    }
}

type Shared = State<Arc<Mutex<FakeData>>>;

#[derive(Debug, Deserialize)]
struct ReviewBody {
    action: String,
}

/// Record the call and decide whether to fail it.
fn record(data: &Mutex<FakeData>, endpoint: Endpoint, id: Option<String>, body: Option<Value>) -> bool {
    let mut data = data.lock().expect("fake backend state poisoned");
    data.calls.push(Call { endpoint, id, body });
    data.failing.contains(&endpoint)
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "simulated failure" })),
    )
        .into_response()
}

fn envelope(data: Value) -> Response {
    Json(json!({ "data": data })).into_response()
}

async fn list_orders(State(data): Shared) -> Response {
    if record(&data, Endpoint::ListOrders, None, None) {
        return failure();
    }
    let orders = data.lock().expect("fake backend state poisoned").orders.clone();
    envelope(Value::Array(orders))
}

async fn list_products(State(data): Shared) -> Response {
    if record(&data, Endpoint::ListProducts, None, None) {
        return failure();
    }
    let products = data.lock().expect("fake backend state poisoned").products.clone();
    envelope(Value::Array(products))
}

async fn list_pharmacists(State(data): Shared) -> Response {
    if record(&data, Endpoint::ListPharmacists, None, None) {
        return failure();
    }
    let pharmacists = data
        .lock()
        .expect("fake backend state poisoned")
        .pharmacists
        .clone();
    envelope(Value::Array(pharmacists))
}

async fn review_order(State(data): Shared, Path(id): Path<String>, Json(body): Json<ReviewBody>) -> Response {
    let body = json!({ "action": body.action });
    if record(&data, Endpoint::ReviewOrder, Some(id), Some(body)) {
        return failure();
    }
    envelope(json!({ "message": "Order updated" }))
}

async fn review_pharmacist(
    State(data): Shared,
    Path(id): Path<String>,
    Json(body): Json<ReviewBody>,
) -> Response {
    let body = json!({ "action": body.action });
    if record(&data, Endpoint::ReviewPharmacist, Some(id), Some(body)) {
        return failure();
    }
    envelope(json!({ "message": "Pharmacist updated" }))
}

async fn add_product(State(data): Shared, Json(body): Json<Value>) -> Response {
    if record(&data, Endpoint::AddProduct, None, Some(body.clone())) {
        return failure();
    }

    let id = {
        let mut data = data.lock().expect("fake backend state poisoned");
        data.next_id += 1;
        format!("new-{}", data.next_id)
    };

    let mut product = body;
    if let Some(fields) = product.as_object_mut() {
        fields.insert("_id".to_string(), Value::String(id));
    }
    (StatusCode::CREATED, Json(json!({ "data": product }))).into_response()
}

async fn delete_product(State(data): Shared, Path(id): Path<String>) -> Response {
    if record(&data, Endpoint::DeleteProduct, Some(id), None) {
        return failure();
    }
    envelope(json!({ "message": "Product deleted" }))
}

// =============================================================================
// Seed Data
// =============================================================================

/// Two pending orders and one already approved.
#[must_use]
pub fn seed_orders() -> Vec<Value> {
    vec![
        json!({ "_id": "o1", "customerName": "Amina Yusuf", "totalAmount": 25.5, "status": "Pending" }),
        json!({ "_id": "o2", "customerName": "Brian Otieno", "totalAmount": "12", "status": "Pending" }),
        json!({ "_id": "o3", "customerName": "Chen Wei", "totalAmount": 8, "status": "Approved" }),
    ]
}

/// Five products across four categories.
#[must_use]
pub fn seed_products() -> Vec<Value> {
    vec![
        product("p1", "Paracetamol 500mg", "Pain Relief", 4.99),
        product("p2", "Vitamin C 1000mg", "Vitamins", 9.5),
        product("p3", "Cetirizine 10mg", "Allergy", 6.25),
        product("p4", "Ibuprofen 200mg", "Pain Relief", 5.75),
        product("p5", "Hand Sanitizer", "Personal Care", 3.0),
    ]
}

/// One pending pharmacist and one approved.
#[must_use]
pub fn seed_pharmacists() -> Vec<Value> {
    vec![
        json!({ "_id": "ph1", "name": "Dr. Grace Mwangi", "email": "grace@pharmacy.test", "status": "Pending" }),
        json!({ "_id": "ph2", "name": "Dr. Henry Park", "email": "henry@pharmacy.test", "status": "Approved" }),
    ]
}

fn product(id: &str, name: &str, category: &str, price: f64) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "category": category,
        "image": format!("https://img.pharmacy.test/{id}.png"),
    })
}

// =============================================================================
// App Servers
// =============================================================================

/// Bind `router` to an ephemeral local port and serve it in the background.
async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });

    addr
}

/// Start an admin console against `backend`. Returns its base URL.
pub async fn spawn_admin(backend: &FakeBackend) -> String {
    use pharmaconnect_admin::config::{AdminConfig, BackendConfig, SentryConfig};

    let config = AdminConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost".to_string(),
        storefront_url: "http://shop.pharmacy.test".to_string(),
        backend: BackendConfig::new(backend.url()).expect("valid backend URL"),
        sentry: SentryConfig::default(),
    };
    let state = pharmaconnect_admin::state::AppState::new(config).expect("admin state");

    let addr = serve(pharmaconnect_admin::app(state)).await;
    format!("http://{addr}")
}

/// Start a storefront against `backend`. Returns its base URL.
pub async fn spawn_storefront(backend: &FakeBackend) -> String {
    use pharmaconnect_storefront::config::{BackendConfig, SentryConfig, StorefrontConfig};

    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost".to_string(),
        backend: BackendConfig::new(backend.url()).expect("valid backend URL"),
        sentry: SentryConfig::default(),
    };
    let state = pharmaconnect_storefront::state::AppState::new(config).expect("storefront state");

    let addr = serve(pharmaconnect_storefront::app(state)).await;
    format!("http://{addr}")
}

/// HTTP client that keeps the session cookie between requests.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// GET `url` and return the status and body.
pub async fn get(client: &reqwest::Client, url: &str) -> (StatusCode, String) {
    let response = client.get(url).send().await.expect("request failed");
    let status = response.status();
    (status, response.text().await.expect("body"))
}

/// Count the rendered occurrences of `needle` in `html`.
#[must_use]
pub fn occurrences(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

/// Collect `(key, value)` pairs into a form body.
#[must_use]
pub fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
