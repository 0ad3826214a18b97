//! User-facing failure notifications.
//!
//! Every failed cart operation produces exactly one message for the person
//! using the storefront. The storefront UI shows these as toasts; the CLI
//! prints them. Successful operations and silent no-ops produce nothing.

use std::sync::Mutex;

/// Message texts shown to the shopper.
pub mod messages {
    /// Requested quantity exceeds available stock.
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
    /// Adding a product failed.
    pub const ADD_FAILED: &str = "Erro na adição do produto";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
    /// Changing a product quantity failed.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// Sink for user-facing error messages.
pub trait Notifier: Send + Sync {
    /// Show an error message to the shopper.
    fn error(&self, message: &str);
}

/// Notifier that keeps every message, in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all collected messages.
    pub fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Copy of all collected messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str) {
        tracing::debug!(notification = %message, "Cart notification");
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
    }
}
