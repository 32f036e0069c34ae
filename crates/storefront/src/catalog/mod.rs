//! Product catalog client.
//!
//! Read-only REST client for the external fake-store catalog. Responses are
//! cached in-memory via `moka` (5 minute TTL); search is a client-side
//! filter over the full product list because the service has no search
//! endpoint.
//!
//! The core only consumes product snapshots from here; callers treat fetch
//! failures as "no products" rather than fatal errors.

pub mod types;

pub use types::{Product, Rating};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use kiosk_core::ProductId;

use crate::config::CatalogConfig;

/// Cache TTL for catalog responses.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached responses.
const CACHE_CAPACITY: u64 = 1000;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("catalog returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No product exists with the given ID.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The request path did not form a valid URL against the base.
    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    ProductsLimited(u32),
    Product(ProductId),
    Categories,
    Category(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<String>),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and cache.
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
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Fetch and decode a JSON endpoint relative to the base URL.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = join_url(&self.inner.base_url, path)?;
        debug!(%url, "catalog request");

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// List every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("cache hit: products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products").await?;
        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// List the first `limit` products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_products_limited(&self, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::ProductsLimited(limit);
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!(limit, "cache hit: limited products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json(&format!("products?limit={limit}")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID; the
    /// service reports unknown IDs as an empty body rather than a 404.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!(%id, "cache hit: product");
            return Ok(*product);
        }

        let url = join_url(&self.inner.base_url, &format!("products/{id}"))?;
        debug!(%url, "catalog request");

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Err(CatalogError::NotFound(id));
        }
        let product: Product = serde_json::from_str(&body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// List all product categories.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("cache hit: categories");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get_json("products/categories").await?;
        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// List the products in one category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Category(category.to_string());
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!(category, "cache hit: category");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json(&format!("products/category/{category}")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Search products by title, description, or category.
    ///
    /// The catalog has no search endpoint, so this fetches the full product
    /// list (cached) and filters locally, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the underlying product list fetch fails.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.to_lowercase();
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.matches(&needle))
            .collect())
    }
}

/// Join a relative path onto the base URL without clobbering any path prefix
/// the base already carries. A path that does not form a valid URL is an
/// error; falling back to the bare base would silently fetch the whole
/// catalog.
fn join_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    base.join(path)
}
