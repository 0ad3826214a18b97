//! RocketShoes REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - The API is source of truth for stock and product details - no local sync
//! - Product details are cached in memory via `moka`; stock never is
//!
//! # Endpoints
//!
//! - `GET /stock/{id}` -> `{ "id": 1, "amount": 3 }`
//! - `GET /products/{id}` -> `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config.api)?;
//!
//! let stock = client.get_stock(ProductId::new(1)).await?;
//! let product = client.get_product(ProductId::new(1)).await?;
//! ```

mod client;

pub use client::ApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the stock and catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configured token is not a valid header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// API returned an unexpected status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}
