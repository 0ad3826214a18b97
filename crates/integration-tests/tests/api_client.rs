//! HTTP client behavior against the stock and catalog API.

#![allow(clippy::unwrap_used)]

use rocketshoes_core::ProductId;
use rocketshoes_integration_tests::{FakeApi, FakeResponse, shoe_catalog};
use rocketshoes_storefront::api::{ApiClient, ApiError};
use secrecy::SecretString;

async fn setup() -> (FakeApi, ApiClient) {
    let api = FakeApi::spawn(shoe_catalog()).await;
    let client = ApiClient::new(&api.api_config()).unwrap();
    (api, client)
}

#[tokio::test]
async fn test_fetches_stock_and_product() {
    let (_api, client) = setup().await;

    let stock = client.get_stock(ProductId::new(2)).await.unwrap();
    assert_eq!(stock.amount, 5);

    let product = client.get_product(ProductId::new(2)).await.unwrap();
    assert_eq!(product.id, ProductId::new(2));
    assert!(product.image.ends_with("tenis2.jpg"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (_api, client) = setup().await;

    let err = client.get_stock(ProductId::new(42)).await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let (api, client) = setup().await;
    api.respond_with(Some(FakeResponse::new(429, "slow down").with_retry_after(7)))
        .await;

    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimited(7)));
}

#[tokio::test]
async fn test_rate_limit_without_header_defaults_to_one_second() {
    let (api, client) = setup().await;
    api.respond_with(Some(FakeResponse::new(429, ""))).await;

    let err = client.get_product(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimited(1)));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let (api, client) = setup().await;
    api.respond_with(Some(FakeResponse::new(500, "database down")))
        .await;

    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let (api, client) = setup().await;
    api.respond_with(Some(FakeResponse::new(200, "<html>not json</html>")))
        .await;

    let stock = client.get_stock(ProductId::new(1)).await.unwrap_err();
    let product = client.get_product(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(stock, ApiError::Parse(_)));
    assert!(matches!(product, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_product_details_are_cached() {
    let (api, client) = setup().await;

    client.get_product(ProductId::new(1)).await.unwrap();
    client.get_product(ProductId::new(1)).await.unwrap();
    client.get_product(ProductId::new(3)).await.unwrap();

    assert_eq!(api.product_requests(), 2);
}

#[tokio::test]
async fn test_stock_is_never_cached() {
    let (api, client) = setup().await;

    assert_eq!(client.get_stock(ProductId::new(1)).await.unwrap().amount, 3);
    api.set_stock(1, 1).await;
    assert_eq!(client.get_stock(ProductId::new(1)).await.unwrap().amount, 1);

    assert_eq!(api.stock_requests(), 2);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let api = FakeApi::spawn(shoe_catalog()).await;
    let mut config = api.api_config();
    config.token = Some(SecretString::from("s3cret-token".to_string()));
    let client = ApiClient::new(&config).unwrap();

    client.get_stock(ProductId::new(1)).await.unwrap();

    assert_eq!(
        api.last_authorization().await.as_deref(),
        Some("Bearer s3cret-token")
    );
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let (api, client) = setup().await;

    client.get_stock(ProductId::new(1)).await.unwrap();

    assert_eq!(api.last_authorization().await, None);
}

#[tokio::test]
async fn test_invalid_token_is_rejected_at_build() {
    let api = FakeApi::spawn(shoe_catalog()).await;
    let mut config = api.api_config();
    config.token = Some(SecretString::from("bad\ntoken".to_string()));

    let result = ApiClient::new(&config);

    assert!(matches!(result, Err(ApiError::InvalidHeader(_))));
}
