//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns a placeholder image when a product has none.
///
/// Usage in templates: `{{ product.image|image_or_placeholder }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn image_or_placeholder(
    url: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    let url = url.to_string();
    if url.trim().is_empty() {
        Ok("https://placehold.co/300x300?text=No+image".to_string())
    } else {
        Ok(url)
    }
}
