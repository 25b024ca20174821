//! Storefront cart library.
//!
//! This crate provides the cart state manager and its collaborators:
//!
//! - [`cart`] - The authoritative in-memory cart and its derived totals
//! - [`persistence`] - Debounced write scheduling
//! - [`storage`] - Durable key-value storage adapters
//! - [`catalog`] - HTTP client for the product catalog
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_cart::{Cart, CartOptions, storage::FileStorage};
//!
//! let storage = Arc::new(FileStorage::new(".cart/storage.json"));
//! let mut cart = Cart::new(storage, CartOptions::default());
//!
//! cart.add_to_cart(&product);
//! assert_eq!(cart.total_items(), 1);
//!
//! // Persist immediately instead of waiting for the debounce window
//! cart.flush()?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod persistence;
pub mod storage;

pub use cart::{Cart, CartOptions, LoadError};
pub use catalog::{CatalogClient, CatalogError};
pub use config::{CartConfig, CatalogConfig, ConfigError};
pub use persistence::PersistScheduler;
pub use storage::{CartStorage, StorageError};
