//! The single error a view can show.
//!
//! Every failing read or write in a view collapses to one human-readable
//! message rendered in place of the view's content. Transport failures, 4xx
//! and 5xx responses are not told apart.

use thiserror::Error;

/// A failed view operation. Its `Display` is the message shown to the
/// visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ViewError {
    /// Storefront home or product list could not load products.
    #[error("Error fetching products")]
    FetchProducts,
    /// Admin dashboard could not load one of its collections.
    #[error("Error fetching data.")]
    FetchDashboard,
    /// Product admin could not load products.
    #[error("Error fetching products.")]
    FetchCatalog,
    #[error("Error updating order status.")]
    UpdateOrder,
    #[error("Error updating pharmacist status.")]
    UpdatePharmacist,
    #[error("Error adding product.")]
    AddProduct,
    #[error("Error deleting the product.")]
    DeleteProduct,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ViewError::FetchDashboard.to_string(), "Error fetching data.");
        assert_eq!(
            ViewError::DeleteProduct.to_string(),
            "Error deleting the product."
        );
    }
}
