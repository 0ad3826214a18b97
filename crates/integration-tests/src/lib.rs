//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! The tests run the real HTTP client and file storage against a stock and
//! catalog API served in-process by [`FakeApi`], so no external service is
//! needed.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, RETRY_AFTER};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_storefront::config::ApiConfig;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use url::Url;

/// Product served by the fake catalog.
#[derive(Debug, Clone)]
pub struct FakeProduct {
    pub id: i32,
    pub title: &'static str,
    pub price: f64,
    pub stock: u32,
}

/// The catalog the storefront tests are written against.
#[must_use]
pub fn shoe_catalog() -> Vec<FakeProduct> {
    vec![
        FakeProduct {
            id: 1,
            title: "Tênis de Caminhada Leve Confortável",
            price: 179.9,
            stock: 3,
        },
        FakeProduct {
            id: 2,
            title: "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            price: 139.9,
            stock: 5,
        },
        FakeProduct {
            id: 3,
            title: "Tênis Adidas Duramo Lite 2.0",
            price: 219.9,
            stock: 2,
        },
        FakeProduct {
            id: 4,
            title: "Tênis Esgotado",
            price: 99.9,
            stock: 0,
        },
    ]
}

/// Canned answer served in place of the stock and product routes.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: u16,
    pub retry_after: Option<u64>,
    pub body: String,
}

impl FakeResponse {
    /// Respond with `status` and a plain-text `body`.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Add a `Retry-After` header.
    #[must_use]
    pub const fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }
}

impl IntoResponse for FakeResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        if let Some(seconds) = self.retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

#[derive(Default)]
struct FakeApiInner {
    products: RwLock<HashMap<i32, FakeProduct>>,
    online: RwLock<bool>,
    canned: RwLock<Option<FakeResponse>>,
    authorization: RwLock<Option<String>>,
    stock_requests: AtomicUsize,
    product_requests: AtomicUsize,
}

impl FakeApiInner {
    /// Record request headers and return the canned answer, if any.
    async fn intercept(&self, headers: &HeaderMap) -> Option<Response> {
        *self.authorization.write().await = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !*self.online.read().await {
            return Some(StatusCode::SERVICE_UNAVAILABLE.into_response());
        }
        self.canned
            .read()
            .await
            .clone()
            .map(IntoResponse::into_response)
    }
}

/// In-process stock and catalog API.
///
/// Serves `GET /stock/{id}` and `GET /products/{id}` on an ephemeral local
/// port. Unknown ids answer 404; [`FakeApi::set_online`] switches every route
/// to 503 and [`FakeApi::respond_with`] replaces every answer with a canned
/// one.
#[derive(Clone)]
pub struct FakeApi {
    inner: Arc<FakeApiInner>,
    addr: SocketAddr,
}

impl FakeApi {
    /// Start serving `products`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn(products: Vec<FakeProduct>) -> Self {
        let inner = Arc::new(FakeApiInner {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
            online: RwLock::new(true),
            ..FakeApiInner::default()
        });

        let app = Router::new()
            .route("/stock/{id}", get(stock))
            .route("/products/{id}", get(product))
            .with_state(Arc::clone(&inner));

        #[allow(clippy::expect_used)]
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake API");
        #[allow(clippy::expect_used)]
        let addr = listener.local_addr().expect("listener has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { inner, addr }
    }

    /// Base URL of the running server.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        #[allow(clippy::expect_used)]
        Url::parse(&format!("http://{}/", self.addr)).expect("valid fake API URL")
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url())
    }

    /// Change the stock reported for a product.
    pub async fn set_stock(&self, id: i32, stock: u32) {
        if let Some(product) = self.inner.products.write().await.get_mut(&id) {
            product.stock = stock;
        }
    }

    /// Take the whole API up or down.
    pub async fn set_online(&self, online: bool) {
        *self.inner.online.write().await = online;
    }

    /// Serve `response` from every route until cleared with `None`.
    pub async fn respond_with(&self, response: Option<FakeResponse>) {
        *self.inner.canned.write().await = response;
    }

    /// `Authorization` header of the most recent request.
    pub async fn last_authorization(&self) -> Option<String> {
        self.inner.authorization.read().await.clone()
    }

    /// Number of stock lookups served so far.
    #[must_use]
    pub fn stock_requests(&self) -> usize {
        self.inner.stock_requests.load(Ordering::SeqCst)
    }

    /// Number of product lookups served so far.
    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.inner.product_requests.load(Ordering::SeqCst)
    }
}

async fn stock(
    State(api): State<Arc<FakeApiInner>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    api.stock_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = api.intercept(&headers).await {
        return response;
    }

    let products = api.products.read().await;
    products.get(&id).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |product| Json(json!({ "id": product.id, "amount": product.stock })).into_response(),
    )
}

async fn product(
    State(api): State<Arc<FakeApiInner>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    api.product_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = api.intercept(&headers).await {
        return response;
    }

    let products = api.products.read().await;
    products.get(&id).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |product| {
            Json(json!({
                "id": product.id,
                "title": product.title,
                "price": product.price,
                "image": format!(
                    "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{}.jpg",
                    product.id
                ),
            }))
            .into_response()
        },
    )
}
