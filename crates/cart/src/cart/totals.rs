//! Derived cart totals.
//!
//! Totals are recomputed from the items on every read, so they can never go
//! stale across a mutation.

use storefront_cart_core::{CartItem, Cents};

/// Sum of item quantities.
#[must_use]
pub fn total_items(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of unit price times quantity, in cents.
#[must_use]
pub fn total_price(items: &[CartItem]) -> Cents {
    items.iter().map(CartItem::line_total).sum()
}
