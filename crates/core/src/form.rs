//! Add-product form.

use serde::{Deserialize, Serialize};

use crate::models::NewProduct;
use crate::types::{Price, PriceError};

/// Errors raised when validating a [`ProductForm`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left blank.
    #[error("{0} is required")]
    Missing(&'static str),
    /// The price field is not a valid amount.
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// Raw text of the add-product form.
///
/// `ProductForm::default()` is the empty form shown after a successful add.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
}

impl ProductForm {
    /// Check every field and build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] naming the first blank field, or the price error.
    pub fn validate(&self) -> Result<NewProduct, FormError> {
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;
        let price_text = required("price", &self.price)?;
        let category = required("category", &self.category)?;
        let image = required("image", &self.image)?;
        let price = Price::parse(&price_text)?;

        Ok(NewProduct {
            name,
            description,
            price,
            category,
            image,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            name: " Cetirizine ".to_string(),
            description: "24h allergy relief".to_string(),
            price: "8.99".to_string(),
            category: "Allergy".to_string(),
            image: "https://img.example/cetirizine.png".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let product = filled().validate().unwrap();
        assert_eq!(product.name, "Cetirizine");
        assert_eq!(product.price.to_string(), "$8.99");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut form = filled();
        form.category = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::Missing("category")));
    }

    #[test]
    fn test_bad_price() {
        let mut form = filled();
        form.price = "free".to_string();
        assert!(matches!(
            form.validate(),
            Err(FormError::Price(PriceError::NotANumber(_)))
        ));
    }
}
