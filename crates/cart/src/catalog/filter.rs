//! Client-side product filtering by category and title search.

use storefront_cart_core::Product;

/// Criteria for narrowing a product listing.
///
/// Both criteria are case-insensitive; an unset criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category name.
    pub category: Option<String>,
    /// Substring of the product title.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Whether `product` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|name| product.category.name.eq_ignore_ascii_case(name.trim()));

        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|needle| {
            needle.is_empty() || product.title.to_lowercase().contains(&needle.to_lowercase())
        });

        category_ok && search_ok
    }

    /// The products that satisfy the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
