//! Session-stored view state.
//!
//! Each admin view keeps the collections it mounted in the session under its
//! own key. Opening a view's shell forgets the key, which unmounts it.

use serde::{Serialize, de::DeserializeOwned};
use tower_sessions::Session;

/// Session keys for mounted views.
pub mod keys {
    /// Key for the dashboard's orders, products and pharmacists.
    pub const DASHBOARD: &str = "dashboard_view";

    /// Key for the product admin's product list.
    pub const CATALOG: &str = "catalog_view";
}

/// Read a mounted view, if any.
pub async fn load<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    session
        .get::<T>(key)
        .await
        .map_err(|e| tracing::warn!(key, "Failed to read view from session: {e}"))
        .ok()
        .flatten()
}

/// Store a view after mounting or patching it.
pub async fn store<T: Serialize + Sync>(session: &Session, key: &str, view: &T) {
    if let Err(e) = session.insert(key, view).await {
        tracing::warn!(key, "Failed to store view in session: {e}");
    }
}

/// Unmount a view.
pub async fn forget(session: &Session, key: &str) {
    if let Err(e) = session.remove_value(key).await {
        tracing::warn!(key, "Failed to clear view from session: {e}");
    }
}
