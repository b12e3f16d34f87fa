//! Client-side product filtering.
//!
//! The product list is small and already in memory, so filtering is a plain
//! predicate re-run on every keystroke. There is no index and no pagination.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Options offered by the category selector, in display order.
pub const CATEGORIES: &[&str] = &[
    "All",
    "Pain Relief",
    "Cough & Cold",
    "Supplements",
    "First Aid",
    "Allergy",
    "Personal Care",
];

/// Number of products shown in the home page's featured row.
pub const FEATURED_COUNT: usize = 4;

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Whether a product's category passes this selection.
    ///
    /// Named categories compare exactly, including case.
    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    /// The selector value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Named(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        if s.is_empty() || s == "All" {
            Self::All
        } else {
            Self::Named(s)
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::All => "All".to_string(),
            Category::Named(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search term plus category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    needle: String,
    category: Category,
}

impl ProductFilter {
    /// Create a filter.
    #[must_use]
    pub fn new(search: impl Into<String>, category: Category) -> Self {
        Self {
            needle: search.into().to_lowercase(),
            category,
        }
    }

    /// Whether a product passes both the search term and the category.
    ///
    /// The term matches case-insensitively against the name or the category.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = self.needle.is_empty()
            || product.name.to_lowercase().contains(&self.needle)
            || product.category.to_lowercase().contains(&self.needle);

        matches_search && self.category.admits(&product.category)
    }

    /// Products passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// The featured subset: the first [`FEATURED_COUNT`] products.
#[must_use]
pub fn featured(products: &[Product]) -> Vec<Product> {
    products.iter().take(FEATURED_COUNT).cloned().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Price, ProductId};

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::parse("1").unwrap(),
            category: category.to_string(),
            image: String::new(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Ibuprofen 200mg", "Pain Relief"),
            product("2", "Cough Syrup", "Cough & Cold"),
            product("3", "Vitamin D3", "Supplements"),
            product("4", "Adhesive Bandages", "First Aid"),
            product("5", "Loratadine", "Allergy"),
            product("6", "Aspirin", "Pain Relief"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_all_and_empty_search_is_identity() {
        let products = catalog();
        let filtered = ProductFilter::new("", Category::All).apply(&products);
        assert_eq!(filtered.len(), products.len());
        assert!(filtered.iter().zip(&products).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_category_exact_match() {
        let products = catalog();
        let filter = ProductFilter::new("", Category::from("Pain Relief"));
        assert_eq!(ids(&filter.apply(&products)), vec!["1", "6"]);

        // Case matters for the category selector
        let filter = ProductFilter::new("", Category::from("pain relief"));
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let products = catalog();
        let filter = ProductFilter::new("VITAMIN", Category::All);
        assert_eq!(ids(&filter.apply(&products)), vec!["3"]);
    }

    #[test]
    fn test_search_matches_category_text() {
        let products = catalog();
        let filter = ProductFilter::new("cold", Category::All);
        assert_eq!(ids(&filter.apply(&products)), vec!["2"]);
    }

    #[test]
    fn test_search_and_category_combine() {
        let products = catalog();
        let filter = ProductFilter::new("asp", Category::from("Pain Relief"));
        assert_eq!(ids(&filter.apply(&products)), vec!["6"]);

        let filter = ProductFilter::new("asp", Category::from("Allergy"));
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from(""), Category::All);
        assert_eq!(Category::from("All"), Category::All);
        assert_eq!(
            Category::from("Allergy"),
            Category::Named("Allergy".to_string())
        );
    }

    #[test]
    fn test_featured_takes_first_four() {
        let products = catalog();
        let featured = featured(&products);
        assert_eq!(featured.len(), FEATURED_COUNT);
        assert_eq!(featured[0].id.as_str(), "1");
        assert_eq!(featured[3].id.as_str(), "4");

        assert_eq!(super::featured(&products[..2]).len(), 2);
    }
}
