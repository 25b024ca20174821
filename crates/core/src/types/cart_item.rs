//! Cart line item.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Cents;
use super::product::Product;

/// A line entry in the cart.
///
/// The unit price and image are snapshots taken when the product is first
/// added; later catalog changes do not affect an existing line.
///
/// Serialized as `{"id", "title", "price", "image", "quantity"}` with `price`
/// in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price in cents.
    pub price: Cents,
    pub image: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new line with quantity 1 from a catalog product.
    ///
    /// Products without images get an empty image reference.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.unit_price(),
            image: product.primary_image().unwrap_or_default().to_owned(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Cents {
        self.price.saturating_mul(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::id::CategoryId;
    use crate::types::product::Category;

    fn product(images: &[&str]) -> Product {
        Product {
            id: ProductId::new(7),
            title: "Hoodie".to_string(),
            price: Decimal::new(1999, 2),
            description: String::new(),
            category: Category {
                id: CategoryId::new(1),
                name: "Clothes".to_string(),
                image: String::new(),
            },
            images: images.iter().map(|s| (*s).to_string()).collect(),
            rating: None,
        }
    }

    #[test]
    fn test_from_product() {
        let item = CartItem::from_product(&product(&["a.png", "b.png"]));

        assert_eq!(item.id, ProductId::new(7));
        assert_eq!(item.title, "Hoodie");
        assert_eq!(item.price, Cents::new(1999));
        assert_eq!(item.image, "a.png");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_from_product_without_images() {
        let item = CartItem::from_product(&product(&[]));
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::from_product(&product(&["a.png"]));
        item.quantity = 2;
        assert_eq!(item.line_total(), Cents::new(3998));
    }

    #[test]
    fn test_wire_format() {
        let item = CartItem::from_product(&product(&["a.png"]));
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "title": "Hoodie",
                "price": 1999,
                "image": "a.png",
                "quantity": 1
            })
        );
    }
}
