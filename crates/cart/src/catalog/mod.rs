//! Product catalog HTTP client.
//!
//! The catalog is a plain REST API serving products and categories as JSON.
//! Responses are cached in memory via `moka` so browsing and adding to the
//! cart do not refetch the same product.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cart::{CatalogClient, CatalogConfig};
//!
//! let catalog = CatalogClient::new(&CatalogConfig::default());
//! let product = catalog.product(ProductId::new(7)).await?;
//! cart.add_to_cart(&product);
//! ```

mod cache;
pub mod filter;

pub use filter::ProductFilter;

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use storefront_cart_core::{Category, Product, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        message: String,
    },

    /// The configured base URL cannot have path segments appended.
    #[error("Invalid catalog base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a catalog client on top of an existing HTTP client.
    #[must_use]
    pub fn with_client(config: &CatalogConfig, client: reqwest::Client) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or parsing fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.endpoint(&["products"])?;
        let products: Vec<Product> = self.get_json(url).await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such product,
    /// or another `CatalogError` if the request or parsing fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()])?;
        let product: Product = self.get_json(url).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or parsing fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let url = self.endpoint(&["categories"])?;
        let categories: Vec<Category> = self.get_json(url).await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Append path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        build_endpoint(&self.inner.base_url, segments)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

fn build_endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
