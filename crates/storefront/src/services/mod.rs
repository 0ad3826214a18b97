//! Lookup services the cart store depends on.
//!
//! # Services
//!
//! - [`StockService`] - available quantity per product, fetched fresh every time
//! - [`CatalogService`] - product details for newly added items
//!
//! Both are implemented over HTTP by [`crate::api::ApiClient`]; tests supply
//! in-memory fakes.

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, StockInfo};

use crate::api::ApiError;

/// Read-only stock lookup.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Current available quantity for `product_id`.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, ApiError>;
}

/// Read-only catalog lookup.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Product details for `product_id`.
    async fn product(&self, product_id: ProductId) -> Result<Product, ApiError>;
}
