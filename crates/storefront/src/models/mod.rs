//! Session-held view state for the storefront.

/// Session keys for per-visitor view state.
pub mod session_keys {
    /// Product list fetched when the listing page was mounted.
    pub const CATALOG_PRODUCTS: &str = "catalog_products";
}
