//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rocket-cli cart add 1
//! rocket-cli cart show
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKETSHOES_API_URL` - Stock and catalog API base URL
//! - `ROCKETSHOES_STORAGE_PATH` - Where the cart is persisted

use std::sync::Arc;

use rocketshoes_core::{CurrencyCode, ProductId};
use rocketshoes_storefront::config::{ConfigError, StorefrontConfig};
use rocketshoes_storefront::notify::Notifier;
use rocketshoes_storefront::state::{AppState, StateError};
use rocketshoes_storefront::{CartError, CartView};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client or storage could not be opened.
    #[error("Startup error: {0}")]
    State(#[from] StateError),

    /// The cart operation did not happen.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Totals could not be computed.
    #[error("Cart total overflowed")]
    Overflow,
}

/// Prints shopper-facing messages to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    #[allow(clippy::print_stderr)]
    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Load configuration and the persisted cart.
pub async fn open() -> Result<AppState, CartCommandError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");
    let state = AppState::new(config, Arc::new(StderrNotifier)).await?;
    tracing::debug!(
        storage = %state.config().storage_path.display(),
        api = %state.api().base_url(),
        "Cart opened"
    );
    Ok(state)
}

/// Print the cart.
pub fn show(state: &AppState) -> Result<(), CartCommandError> {
    let cart = state.cart().cart();
    let view =
        CartView::from_items(&cart, CurrencyCode::default()).ok_or(CartCommandError::Overflow)?;
    print_view(&view);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_view(view: &CartView) {
    if view.lines.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in &view.lines {
        println!(
            "{:>4}  {:<40} {:>3} x {:>12} = {:>12}",
            line.id,
            line.title,
            line.amount,
            line.price.display(),
            line.subtotal.display()
        );
    }
    println!(
        "{} product(s), {} item(s), total {}",
        view.cart_size,
        view.item_count,
        view.total.display()
    );
}

/// Add one unit of a product.
pub async fn add(state: &AppState, product_id: ProductId) -> Result<(), CartCommandError> {
    state.cart().add_product(product_id).await?;
    show(state)
}

/// Remove a product.
pub async fn remove(state: &AppState, product_id: ProductId) -> Result<(), CartCommandError> {
    state.cart().remove_product(product_id).await?;
    show(state)
}

/// Set the amount held for a product.
pub async fn update(
    state: &AppState,
    product_id: ProductId,
    amount: i64,
) -> Result<(), CartCommandError> {
    state
        .cart()
        .update_product_amount(product_id, amount)
        .await?;
    show(state)
}
