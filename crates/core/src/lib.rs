//! Storefront cart core - shared types library.
//!
//! This crate provides the types shared by every storefront cart component:
//! - `storefront-cart` - Cart state manager, persistence, and catalog client
//! - `storefront-cart-cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, minor-unit prices, catalog products, and cart items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
