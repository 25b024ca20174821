//! Integration tests for the storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - End-to-end cart flows against file storage
//! - `persistence` - Debounced writes observed through real storage backends
//!
//! This library holds the shared fixtures: catalog products and a cart bound
//! to a temporary storage file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use storefront_cart::storage::{DEFAULT_CART_KEY, FileStorage};
use storefront_cart::{Cart, CartOptions, CartStorage};
use storefront_cart_core::{CartItem, Category, CategoryId, Product, ProductId};
use tempfile::TempDir;

/// Debounce delay used by the fixtures.
pub const PERSIST_DELAY: Duration = Duration::from_millis(1000);

/// Build a catalog product priced in cents.
#[must_use]
pub fn product(id: i64, title: &str, cents: i64, images: &[&str]) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        description: format!("{title} description"),
        category: Category {
            id: CategoryId::new(1),
            name: "Clothes".to_string(),
            image: "clothes.png".to_string(),
        },
        images: images.iter().map(|s| (*s).to_string()).collect(),
        rating: Some(4.5),
    }
}

/// A hooded sweatshirt at $19.99.
#[must_use]
pub fn hoodie() -> Product {
    product(7, "Classic Hooded Sweatshirt", 1999, &["a.png", "a-back.png"])
}

/// A cap at $5.00.
#[must_use]
pub fn cap() -> Product {
    product(9, "Baseball Cap", 500, &["b.png"])
}

/// A temporary storage file that outlives the carts opened on it.
pub struct TempStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TempStore {
    /// Create an empty storage location in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("storage.json");
        Self { _dir: dir, path }
    }

    /// Path of the storage file.
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// A fresh handle on the storage file, as a new process would open it.
    #[must_use]
    pub fn storage(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::new(&self.path))
    }

    /// Open a cart on the storage file (simulates a page load).
    #[must_use]
    pub fn open_cart(&self) -> Cart {
        Cart::new(
            self.storage(),
            CartOptions {
                storage_key: DEFAULT_CART_KEY.to_string(),
                persist_delay: PERSIST_DELAY,
            },
        )
    }

    /// The items currently persisted, if any.
    ///
    /// # Panics
    ///
    /// Panics if the storage file or the blob cannot be read.
    #[must_use]
    pub fn persisted_items(&self) -> Option<Vec<CartItem>> {
        self.storage()
            .get(DEFAULT_CART_KEY)
            .expect("read storage")
            .map(|blob| serde_json::from_str(&blob).expect("parse persisted cart"))
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}
