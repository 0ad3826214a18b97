//! HTTP implementation of the stock and catalog lookups.
//!
//! Caches product details using `moka` (TTL from configuration).

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rocketshoes_core::{Product, ProductId, StockInfo};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ApiError;
use crate::config::ApiConfig;
use crate::services::{CatalogService, StockService};

/// Maximum number of product details kept in memory.
const CATALOG_CACHE_CAPACITY: u64 = 1000;

/// Client for the RocketShoes stock and catalog API.
///
/// Cheap to clone; clones share the connection pool and the product cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    catalog_cache: Cache<ProductId, Product>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let catalog_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                catalog_cache,
            }),
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// GET a JSON resource.
    ///
    /// `resource` names the thing being fetched for `NotFound` messages.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(resource.to_string()));
        }

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Get the current stock level for a product.
    ///
    /// Never cached: every cart mutation must see fresh stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has no stock record or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, ApiError> {
        let stock: StockInfo = self
            .get_json(
                &format!("stock/{product_id}"),
                &format!("stock for product {product_id}"),
            )
            .await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }

    /// Get product details.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        // Check cache
        if let Some(product) = self.inner.catalog_cache.get(&product_id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self
            .get_json(
                &format!("products/{product_id}"),
                &format!("product {product_id}"),
            )
            .await?;

        self.inner
            .catalog_cache
            .insert(product_id, product.clone())
            .await;

        Ok(product)
    }
}

#[async_trait]
impl StockService for ApiClient {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, ApiError> {
        self.get_stock(product_id).await
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        self.get_product(product_id).await
    }
}
