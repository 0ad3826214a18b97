//! Application state wiring configuration to the cart.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::cart::{CartServices, CartStore};
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::storage::{FileStorage, StorageError};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("API client error: {0}")]
    Api(#[from] ApiError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application state shared across consumers.
///
/// This struct is cheaply cloneable via `Arc` and hands out the one cart
/// store every consumer reads and mutates.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the API client, opens file storage at the configured path and
    /// loads the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built or the persisted
    /// cart cannot be read.
    pub async fn new(
        config: StorefrontConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StateError> {
        let api = ApiClient::new(&config.api)?;
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        let cart = CartStore::load(CartServices::from_client(api.clone()), storage, notifier).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, api, cart }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the stock and catalog API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
