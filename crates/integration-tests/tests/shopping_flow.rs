//! End-to-end cart flows against file storage.
//!
//! Each "page load" opens a new cart on the same storage file, the way a
//! browser reload rehydrates the cart from local storage.

#![allow(clippy::unwrap_used)]

use std::fs;

use storefront_cart_core::{Cents, ProductId};
use storefront_cart_integration_tests::{PERSIST_DELAY, TempStore, cap, hoodie};

// =============================================================================
// Browse -> add -> increment -> remove -> reload
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_add_increment_remove_reload_persists() {
    let store = TempStore::new();
    let product = hoodie();

    // Add to cart: badge shows 1, line carries title and price
    let mut cart = store.open_cart();
    cart.add_to_cart(&product);
    assert_eq!(cart.total_items(), 1);
    let item = cart.item(product.id).unwrap();
    assert_eq!(item.title, product.title);
    assert_eq!(item.price.display(), "$19.99");

    // Increment from the cart page: badge shows 2
    cart.update_quantity(product.id, 2);
    assert_eq!(cart.item(product.id).unwrap().quantity, 2);
    assert_eq!(cart.total_items(), 2);

    // Remove: cart is empty
    cart.remove_from_cart(product.id);
    assert!(cart.is_empty());

    // Add again and let the debounce window pass
    cart.add_to_cart(&product);
    tokio::time::sleep(PERSIST_DELAY * 2).await;

    // Reload: the item survives
    let reloaded = store.open_cart();
    assert!(reloaded.last_load_error().is_none());
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.item(product.id).unwrap().quantity, 1);
    assert_eq!(reloaded.total_price(), Cents::new(1999));
}

#[tokio::test(start_paused = true)]
async fn test_worked_example_round_trips_through_storage() {
    let store = TempStore::new();
    let mut cart = store.open_cart();

    cart.add_to_cart(&hoodie());
    cart.add_to_cart(&hoodie());
    cart.add_to_cart(&cap());
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Cents::new(4498));

    tokio::time::sleep(PERSIST_DELAY * 2).await;

    let persisted = store.persisted_items().unwrap();
    assert_eq!(persisted, cart.items().to_vec());

    let mut reloaded = store.open_cart();
    assert_eq!(reloaded.total_price(), Cents::new(4498));

    reloaded.remove_from_cart(ProductId::new(7));
    assert_eq!(reloaded.total_price(), Cents::new(500));

    reloaded.update_quantity(ProductId::new(9), 0);
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.total_items(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_persisted_blob_layout() {
    let store = TempStore::new();
    let mut cart = store.open_cart();
    cart.add_to_cart(&hoodie());
    tokio::time::sleep(PERSIST_DELAY * 2).await;

    let file: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let blob = file["cart:v1"].as_str().unwrap();
    let items: serde_json::Value = serde_json::from_str(blob).unwrap();

    assert_eq!(
        items,
        serde_json::json!([{
            "id": 7,
            "title": "Classic Hooded Sweatshirt",
            "price": 1999,
            "image": "a.png",
            "quantity": 1
        }])
    );
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_corrupted_storage_recovers_to_empty_cart() {
    let store = TempStore::new();
    fs::write(store.path(), r#"{"cart:v1": "[{\"id\": 7, \"title\""}"#).unwrap();

    let mut cart = store.open_cart();
    assert!(cart.is_empty());
    assert!(cart.last_load_error().is_some());

    // The cart stays usable and overwrites the bad blob
    cart.add_to_cart(&cap());
    tokio::time::sleep(PERSIST_DELAY * 2).await;

    let reloaded = store.open_cart();
    assert!(reloaded.last_load_error().is_none());
    assert_eq!(reloaded.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_persists_empty_cart() {
    let store = TempStore::new();
    let mut cart = store.open_cart();
    cart.add_to_cart(&hoodie());
    cart.add_to_cart(&cap());
    tokio::time::sleep(PERSIST_DELAY * 2).await;

    cart.clear_cart();
    tokio::time::sleep(PERSIST_DELAY * 2).await;

    assert_eq!(store.persisted_items(), Some(Vec::new()));
    assert!(store.open_cart().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_independent_carts_last_writer_wins() {
    let store = TempStore::new();
    let mut first = store.open_cart();
    let mut second = store.open_cart();

    first.add_to_cart(&hoodie());
    first.flush().unwrap();
    second.add_to_cart(&cap());
    second.flush().unwrap();

    let reloaded = store.open_cart();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.item(ProductId::new(9)).is_some());
}
