//! Shopping cart state.
//!
//! [`CartStore`] owns the shopper's cart: an ordered list of [`CartItem`]s
//! with at most one entry per product and every amount within the stock the
//! API reports. The cart can only change through [`CartStore::add_product`],
//! [`CartStore::remove_product`] and [`CartStore::update_product_amount`].
//! Each successful change writes the full snapshot to local storage under
//! [`keys::CART`] before it becomes visible through [`CartStore::cart`].
//!
//! # Example
//!
//! ```rust,ignore
//! let store = CartStore::load(CartServices::from_client(client), storage, notifier).await?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.update_product_amount(ProductId::new(1), 3).await?;
//! store.remove_product(ProductId::new(1)).await?;
//! ```

pub mod ops;
mod view;

pub use view::{CartLineView, CartView};

use std::sync::{Arc, PoisonError, RwLock};

use rocketshoes_core::{CartItem, ProductId};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::api::ApiClient;
use crate::error::{CartError, OperationError, Result};
use crate::notify::Notifier;
use crate::services::{CatalogService, StockService};
use crate::storage::{Storage, StorageError, keys};

use ops::{AddPlan, AmountChange};

/// Lookup services used by the cart.
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn CatalogService>,
}

impl CartServices {
    /// Use one API client for both stock and catalog lookups.
    #[must_use]
    pub fn from_client(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            stock: client.clone(),
            catalog: client,
        }
    }
}

/// Handle to the shopper's cart.
///
/// Cheaply cloneable; clones share the same cart. Mutations are serialized:
/// an operation holds the store's operation lock from its stock lookup
/// through the persisted write, so concurrent calls never lose each other's
/// changes. Readers never wait on that lock.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    services: CartServices,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    snapshot: RwLock<Arc<Vec<CartItem>>>,
    op_lock: Mutex<()>,
}

impl CartStore {
    /// Create the store from the snapshot persisted in `storage`.
    ///
    /// An absent snapshot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be read or the persisted
    /// snapshot is not a valid cart.
    #[instrument(skip_all)]
    pub async fn load(
        services: CartServices,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> std::result::Result<Self, StorageError> {
        let items = match storage.get_item(keys::CART).await? {
            Some(raw) => parse_snapshot(&raw)?,
            None => Vec::new(),
        };
        info!(items = items.len(), "Cart loaded");

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                services,
                storage,
                notifier,
                snapshot: RwLock::new(Arc::new(items)),
                op_lock: Mutex::new(()),
            }),
        })
    }

    /// Current cart snapshot.
    ///
    /// A failed operation leaves the returned `Arc` pointing at the same
    /// snapshot as before the call.
    #[must_use]
    pub fn cart(&self) -> Arc<Vec<CartItem>> {
        let guard = self
            .inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Add one unit of a product.
    ///
    /// Increments the amount when the product is already in the cart,
    /// otherwise fetches its details and appends it with amount 1.
    ///
    /// # Errors
    ///
    /// - `CartError::InsufficientStock` if one more unit would exceed stock
    /// - `CartError::AddFailed` if a lookup or the persisted write fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<()> {
        let result = self.try_add_product(product_id).await;
        self.report(result)
    }

    /// Remove a product and its whole amount.
    ///
    /// # Errors
    ///
    /// Returns `CartError::RemoveFailed` if the product is not in the cart or
    /// the persisted write fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<()> {
        let result = self.try_remove_product(product_id).await;
        self.report(result)
    }

    /// Set the amount held for a product.
    ///
    /// A non-positive `amount` is ignored: nothing changes and nothing is
    /// reported.
    ///
    /// # Errors
    ///
    /// - `CartError::InsufficientStock` if `amount` exceeds stock
    /// - `CartError::UpdateFailed` if the stock lookup or persisted write
    ///   fails, or the product is not in the cart
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> Result<()> {
        let result = self.try_update_product_amount(product_id, amount).await;
        self.report(result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<()> {
        let failed = |source: OperationError| CartError::AddFailed { product_id, source };

        let _op = self.inner.op_lock.lock().await;
        let current = self.cart();

        let stock = self
            .inner
            .services
            .stock
            .stock(product_id)
            .await
            .map_err(|e| failed(e.into()))?;

        let next = match ops::plan_add(&current, product_id, &stock)? {
            AddPlan::Increment { amount } => ops::apply_increment(&current, product_id, amount),
            AddPlan::Append => {
                let product = self
                    .inner
                    .services
                    .catalog
                    .product(product_id)
                    .await
                    .map_err(|e| failed(e.into()))?;
                ops::apply_append(&current, product_id, product)?
            }
        };

        self.commit(next).await.map_err(|e| failed(e.into()))?;
        info!(
            amount = ops::held_amount(&self.cart(), product_id),
            "Product added to cart"
        );
        Ok(())
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<()> {
        let _op = self.inner.op_lock.lock().await;
        let current = self.cart();

        let next = ops::remove(&current, product_id)?;

        self.commit(next)
            .await
            .map_err(|e| CartError::RemoveFailed {
                product_id,
                source: e.into(),
            })?;
        info!("Product removed from cart");
        Ok(())
    }

    async fn try_update_product_amount(&self, product_id: ProductId, amount: i64) -> Result<()> {
        let failed = |source: OperationError| CartError::UpdateFailed { product_id, source };

        let _op = self.inner.op_lock.lock().await;
        let current = self.cart();

        let stock = self
            .inner
            .services
            .stock
            .stock(product_id)
            .await
            .map_err(|e| failed(e.into()))?;

        match ops::set_amount(&current, product_id, amount, &stock)? {
            AmountChange::Set(next) => {
                self.commit(next).await.map_err(|e| failed(e.into()))?;
                info!(amount, "Product amount updated");
            }
            AmountChange::Ignored => {
                debug!(amount, "Ignoring non-positive amount");
            }
        }
        Ok(())
    }

    /// Persist `next`, then publish it.
    async fn commit(&self, next: Vec<CartItem>) -> std::result::Result<(), StorageError> {
        let raw = serde_json::to_string(&next)?;
        self.inner.storage.set_item(keys::CART, raw).await?;

        let mut guard = self
            .inner
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
        Ok(())
    }

    /// Hand a failure to the notifier and pass the result through.
    fn report(&self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            warn!(error = %err, "Cart operation failed");
            self.inner.notifier.error(err.user_message());
        }
        result
    }
}

/// Parse a persisted cart snapshot.
fn parse_snapshot(raw: &str) -> std::result::Result<Vec<CartItem>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
        location: keys::CART.to_string(),
        reason: e.to_string(),
    })
}
