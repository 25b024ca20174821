//! Catalog product types.
//!
//! These mirror the records served by the external catalog. The cart only
//! reads them; it never mutates or re-fetches a product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Cents;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// A catalog product.
///
/// Unknown fields in catalog payloads (slugs, timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in decimal major units; a JSON number on the wire.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// Ordered image references; the first is the representative image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Product {
    /// The unit price converted to cents.
    #[must_use]
    pub fn unit_price(&self) -> Cents {
        Cents::from_major_units(self.price)
    }

    /// The first image reference, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG_PRODUCT: &str = r#"{
        "id": 7,
        "title": "Classic Hooded Sweatshirt",
        "slug": "classic-hooded-sweatshirt",
        "price": 19.99,
        "description": "Warm and soft.",
        "category": {
            "id": 1,
            "name": "Clothes",
            "image": "https://example.test/clothes.png",
            "creationAt": "2025-01-01T00:00:00.000Z"
        },
        "images": ["a.png", "b.png"],
        "creationAt": "2025-01-01T00:00:00.000Z"
    }"#;

    #[test]
    fn test_deserialize_catalog_product() {
        let product: Product = serde_json::from_str(CATALOG_PRODUCT).unwrap();

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.category.name, "Clothes");
        assert_eq!(product.images.len(), 2);
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_deserialize_integer_price() {
        let json = r#"{"id": 9, "title": "Cap", "price": 5, "category": {"id": 1, "name": "Clothes"}}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.unit_price(), Cents::new(500));
        assert!(product.images.is_empty());
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_unit_price_and_primary_image() {
        let product: Product = serde_json::from_str(CATALOG_PRODUCT).unwrap();

        assert_eq!(product.unit_price(), Cents::new(1999));
        assert_eq!(product.primary_image(), Some("a.png"));
    }

    #[test]
    fn test_primary_image_missing() {
        let mut product: Product = serde_json::from_str(CATALOG_PRODUCT).unwrap();
        product.images.clear();

        assert_eq!(product.primary_image(), None);
    }
}
