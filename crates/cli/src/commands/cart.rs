//! Cart commands.
//!
//! Each command opens the cart from the storage file, applies one change,
//! prints the result, and flushes before exiting so the change is not lost
//! inside the debounce window.
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_PATH` - Storage file holding the cart
//! - `CART_STORAGE_KEY` - Key the cart is stored under
//! - `CATALOG_BASE_URL` - Catalog API used by `add`

use std::fmt::Write as _;
use std::sync::Arc;

use storefront_cart::storage::FileStorage;
use storefront_cart::{Cart, CartConfig, CatalogClient, CatalogError, StorageError};
use storefront_cart_core::ProductId;
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Writing the cart failed.
    #[error("Failed to save cart: {0}")]
    Storage(#[from] StorageError),

    /// Fetching the product failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Print the cart.
pub fn show(config: &CartConfig) {
    let cart = open(config);
    print_cart(&cart);
}

/// Fetch a product from the catalog and add one unit.
pub async fn add(config: &CartConfig, product_id: ProductId) -> Result<(), CartCommandError> {
    let catalog = CatalogClient::new(&config.catalog);

    tracing::info!("Fetching product {product_id} from catalog...");
    let product = catalog.product(product_id).await?;

    let mut cart = open(config);
    cart.add_to_cart(&product);
    tracing::info!("Added {} to cart", product.title);

    close(cart)
}

/// Remove a product's line.
pub fn remove(config: &CartConfig, product_id: ProductId) -> Result<(), CartCommandError> {
    let mut cart = open(config);

    if cart.item(product_id).is_none() {
        tracing::warn!("Product {product_id} is not in the cart");
    }
    cart.remove_from_cart(product_id);

    close(cart)
}

/// Set a line's quantity.
pub fn set_quantity(
    config: &CartConfig,
    product_id: ProductId,
    quantity: i64,
) -> Result<(), CartCommandError> {
    let mut cart = open(config);

    if cart.item(product_id).is_none() {
        tracing::warn!("Product {product_id} is not in the cart");
    }
    cart.update_quantity(product_id, quantity);

    close(cart)
}

/// Empty the cart.
pub fn clear(config: &CartConfig) -> Result<(), CartCommandError> {
    let mut cart = open(config);
    cart.clear_cart();
    close(cart)
}

fn open(config: &CartConfig) -> Cart {
    let storage = Arc::new(FileStorage::new(&config.storage_path));
    let path = storage.path().display().to_string();
    let cart = Cart::new(storage, config.cart.clone());

    if let Some(e) = cart.last_load_error() {
        tracing::warn!(
            path = %path,
            key = cart.storage_key(),
            "Saved cart could not be read ({e}), starting with an empty cart"
        );
    } else {
        tracing::debug!(
            path = %path,
            key = cart.storage_key(),
            items = cart.len(),
            "Opened cart"
        );
    }
    cart
}

fn close(mut cart: Cart) -> Result<(), CartCommandError> {
    print_cart(&cart);
    cart.flush()?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    print!("{}", render_cart(cart));
}

/// Render the cart as a plain-text table.
fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        let _ = writeln!(
            out,
            "#{:<6} {:<40} {:>10} x {:<4} {:>10}",
            item.id.as_i64(),
            item.title,
            item.price.display(),
            item.quantity,
            item.line_total().display()
        );
    }
    let _ = writeln!(
        out,
        "Items: {}  Total: {}",
        cart.total_items(),
        cart.total_price().display()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use storefront_cart::storage::MemoryStorage;
    use storefront_cart::{CartOptions, CatalogConfig};
    use storefront_cart_core::{Category, CategoryId, Product};
    use tempfile::TempDir;

    use super::*;

    fn product(id: i64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::new(cents, 2),
            description: String::new(),
            category: Category {
                id: CategoryId::new(1),
                name: "Clothes".to_string(),
                image: String::new(),
            },
            images: vec!["a.png".to_string()],
            rating: None,
        }
    }

    #[test]
    fn test_render_empty_cart() {
        let cart = Cart::new(Arc::new(MemoryStorage::new()), CartOptions::default());
        assert_eq!(render_cart(&cart), "Your cart is empty\n");
    }

    #[test]
    fn test_render_cart_lines_and_totals() {
        let mut cart = Cart::new(Arc::new(MemoryStorage::new()), CartOptions::default());
        let hoodie = product(7, "Hoodie", 1999);
        cart.add_to_cart(&hoodie);
        cart.add_to_cart(&hoodie);
        cart.add_to_cart(&product(9, "Cap", 500));

        let rendered = render_cart(&cart);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#7"));
        assert!(lines[0].contains("$19.99"));
        assert!(lines[0].contains("$39.98"));
        assert!(lines[1].starts_with("#9"));
        assert_eq!(lines[2], "Items: 3  Total: $44.98");
    }

    fn config_in(dir: &TempDir) -> CartConfig {
        CartConfig {
            cart: CartOptions::default(),
            storage_path: dir.path().join("cart").join("storage.json"),
            catalog: CatalogConfig::default(),
        }
    }

    /// Write a hoodie x2 and a cap x1 to the configured storage file.
    fn seed(config: &CartConfig) {
        let storage = Arc::new(FileStorage::new(&config.storage_path));
        let mut cart = Cart::new(storage, config.cart.clone());
        let hoodie = product(7, "Hoodie", 1999);
        cart.add_to_cart(&hoodie);
        cart.add_to_cart(&hoodie);
        cart.add_to_cart(&product(9, "Cap", 500));
        cart.flush().unwrap();
    }

    fn reopen(config: &CartConfig) -> Cart {
        let storage = Arc::new(FileStorage::new(&config.storage_path));
        Cart::new(storage, config.cart.clone())
    }

    #[test]
    fn test_remove_is_saved_to_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        seed(&config);

        remove(&config, ProductId::new(7)).unwrap();

        let cart = reopen(&config);
        assert!(cart.last_load_error().is_none());
        assert_eq!(cart.len(), 1);
        assert!(cart.item(ProductId::new(7)).is_none());
        assert_eq!(cart.total_price().as_i64(), 500);
    }

    #[test]
    fn test_set_quantity_is_saved_to_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        seed(&config);

        set_quantity(&config, ProductId::new(9), 4).unwrap();
        set_quantity(&config, ProductId::new(7), 0).unwrap();

        let cart = reopen(&config);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(ProductId::new(9)).unwrap().quantity, 4);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_clear_is_saved_to_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        seed(&config);

        clear(&config).unwrap();

        let cart = reopen(&config);
        assert!(cart.last_load_error().is_none());
        assert!(cart.is_empty());

        let file = std::fs::read_to_string(&config.storage_path).unwrap();
        let entries: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&file).unwrap();
        assert_eq!(entries.get(&config.cart.storage_key).map(String::as_str), Some("[]"));
    }
}
