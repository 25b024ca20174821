//! Cart state manager.
//!
//! [`Cart`] owns the authoritative list of cart lines. Mutations run to
//! completion on the caller's task (they take `&mut self`), and each one that
//! changes the cart arms a debounced write of the whole list through the
//! storage adapter.
//!
//! # Lifecycle
//!
//! construct (loads persisted state) -> mutate* -> [`Cart::flush`] or drop.

mod totals;

pub use totals::{total_items, total_price};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use storefront_cart_core::{CartItem, Cents, Product, ProductId};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::persistence::{DEFAULT_PERSIST_DELAY, PersistScheduler};
use crate::storage::{CartStorage, DEFAULT_CART_KEY, StorageError};

/// Errors that can occur when loading the persisted cart.
///
/// A load error never escapes [`Cart::load_cart`]; the cart starts empty and
/// the error is kept for diagnostics in [`Cart::last_load_error`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The storage backend could not be read.
    #[error("Storage read failed: {0}")]
    Storage(#[from] StorageError),

    /// The stored blob is not a valid list of cart items.
    #[error("Malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The stored blob lists the same product twice.
    #[error("Duplicate cart item: {0}")]
    DuplicateItem(ProductId),

    /// The stored blob contains an item with quantity 0.
    #[error("Cart item {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// Cart construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Debounce delay between the last mutation and the write.
    pub persist_delay: Duration,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            persist_delay: DEFAULT_PERSIST_DELAY,
        }
    }
}

/// The shopping cart.
///
/// Items keep insertion order, product ids are unique, and every item has a
/// quantity of at least 1.
pub struct Cart {
    items: Vec<CartItem>,
    storage: Arc<dyn CartStorage>,
    storage_key: String,
    scheduler: PersistScheduler,
    last_load_error: Option<LoadError>,
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items)
            .field("storage_key", &self.storage_key)
            .field("scheduler", &self.scheduler)
            .field("last_load_error", &self.last_load_error)
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Create a cart and hydrate it from storage.
    ///
    /// Load failures leave the cart empty; see [`Self::last_load_error`].
    #[must_use]
    pub fn new(storage: Arc<dyn CartStorage>, options: CartOptions) -> Self {
        let mut cart = Self {
            items: Vec::new(),
            storage,
            storage_key: options.storage_key,
            scheduler: PersistScheduler::new(options.persist_delay),
            last_load_error: None,
        };
        cart.load_cart();
        cart
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its quantity incremented; its price
    /// and image stay as they were when it was first added.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(item) = self.item_mut(product.id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(product_id = %product.id, quantity = item.quantity, "Incremented cart item");
        } else {
            let item = CartItem::from_product(product);
            debug!(product_id = %item.id, price = %item.price, "Added cart item");
            self.items.push(item);
        }

        self.schedule_persist();
    }

    /// Remove the item for `product_id`. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let Some(index) = self.items.iter().position(|item| item.id == product_id) else {
            return;
        };

        self.items.remove(index);
        debug!(product_id = %product_id, "Removed cart item");
        self.schedule_persist();
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of zero or less removes the item. Quantities beyond
    /// `u32::MAX` saturate. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.item_mut(product_id) else {
            return;
        };

        item.quantity = quantity;
        debug!(product_id = %product_id, quantity, "Updated cart item quantity");
        self.schedule_persist();
    }

    /// Remove every item.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
        self.schedule_persist();
    }

    /// Replace the cart contents with the persisted state.
    ///
    /// Any pending write is discarded first, since it holds the state being
    /// replaced. Missing data yields an empty cart. Unreadable or invalid data
    /// also yields an empty cart, and the error is logged and kept in
    /// [`Self::last_load_error`].
    pub fn load_cart(&mut self) {
        if self.scheduler.cancel() {
            debug!("Discarded pending cart write before reload");
        }

        match read_items(self.storage.as_ref(), &self.storage_key) {
            Ok(items) => {
                info!(key = %self.storage_key, items = items.len(), "Loaded cart");
                self.items = items;
                self.last_load_error = None;
            }
            Err(e) => {
                warn!(
                    key = %self.storage_key,
                    error = %e,
                    "Failed to load cart, starting empty"
                );
                self.items.clear();
                self.last_load_error = Some(e);
            }
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current state now, discarding any pending debounced write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails. The in-memory cart is
    /// unaffected either way.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.scheduler.cancel();
        write_items(self.storage.as_ref(), &self.storage_key, &self.items)
    }

    /// Discard the pending debounced write without writing.
    ///
    /// Returns `true` if a write was pending.
    pub fn cancel_pending_write(&mut self) -> bool {
        self.scheduler.cancel()
    }

    /// Whether a debounced write is armed and has not yet run.
    #[must_use]
    pub fn has_pending_write(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn schedule_persist(&mut self) {
        let storage = Arc::clone(&self.storage);
        let key = self.storage_key.clone();
        let snapshot = self.items.clone();

        debug!(
            key = %key,
            delay_ms = self.scheduler.delay().as_millis(),
            "Scheduling cart write"
        );
        self.scheduler.arm(move || {
            match write_items(storage.as_ref(), &key, &snapshot) {
                Ok(()) => debug!(key = %key, items = snapshot.len(), "Persisted cart"),
                Err(e) => error!(key = %key, error = %e, "Failed to persist cart"),
            }
        });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        total_items(&self.items)
    }

    /// Sum of unit price times quantity, in cents.
    #[must_use]
    pub fn total_price(&self) -> Cents {
        total_price(&self.items)
    }

    /// The error from the most recent load, if it failed.
    #[must_use]
    pub const fn last_load_error(&self) -> Option<&LoadError> {
        self.last_load_error.as_ref()
    }

    /// The key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == product_id)
    }
}

/// Read and validate the persisted item list.
fn read_items(storage: &dyn CartStorage, key: &str) -> Result<Vec<CartItem>, LoadError> {
    let Some(blob) = storage.get(key)? else {
        return Ok(Vec::new());
    };

    let items: Vec<CartItem> = serde_json::from_str(&blob)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if item.quantity == 0 {
            return Err(LoadError::ZeroQuantity(item.id));
        }
        if !seen.insert(item.id) {
            return Err(LoadError::DuplicateItem(item.id));
        }
    }

    Ok(items)
}

fn write_items(storage: &dyn CartStorage, key: &str, items: &[CartItem]) -> Result<(), StorageError> {
    let blob = serde_json::to_string(items)?;
    storage.set(key, &blob)
}
