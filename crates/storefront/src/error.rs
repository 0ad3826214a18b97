//! Cart operation errors.
//!
//! Every failure of `add_product`, `remove_product` or `update_product_amount`
//! is a [`CartError`]. Each variant maps to exactly one user-facing message
//! (see [`CartError::user_message`]), which the store hands to its
//! [`Notifier`](crate::notify::Notifier) before returning the error.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::notify::messages;
use crate::storage::StorageError;

/// Why a cart operation did not happen.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error(
        "Insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// Adding a product failed.
    #[error("Failed to add product {product_id}: {source}")]
    AddFailed {
        product_id: ProductId,
        #[source]
        source: OperationError,
    },

    /// Removing a product failed.
    #[error("Failed to remove product {product_id}: {source}")]
    RemoveFailed {
        product_id: ProductId,
        #[source]
        source: OperationError,
    },

    /// Changing a product quantity failed.
    #[error("Failed to update amount of product {product_id}: {source}")]
    UpdateFailed {
        product_id: ProductId,
        #[source]
        source: OperationError,
    },
}

/// Underlying cause of an add/remove/update failure.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Stock or catalog lookup failed.
    #[error("lookup failed: {0}")]
    Api(#[from] ApiError),

    /// Persisting the new snapshot failed.
    #[error("persist failed: {0}")]
    Storage(#[from] StorageError),

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The catalog answered with a different product than was asked for.
    #[error("catalog returned product {received} for product {requested}")]
    ProductMismatch {
        requested: ProductId,
        received: ProductId,
    },
}

impl CartError {
    /// The message shown to the shopper for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => messages::OUT_OF_STOCK,
            Self::AddFailed { .. } => messages::ADD_FAILED,
            Self::RemoveFailed { .. } => messages::REMOVE_FAILED,
            Self::UpdateFailed { .. } => messages::UPDATE_FAILED,
        }
    }

    /// Whether the failure came from the stock limit rather than a fault.
    #[must_use]
    pub const fn is_insufficient_stock(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. })
    }
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
