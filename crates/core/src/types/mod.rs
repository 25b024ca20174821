//! Core types for the storefront cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart_item;
pub mod id;
pub mod price;
pub mod product;

pub use cart_item::CartItem;
pub use id::*;
pub use price::Cents;
pub use product::{Category, Product};
