//! RocketShoes Storefront library.
//!
//! Client-side cart state for the RocketShoes storefront: a cart store that
//! validates every change against the stock API and keeps the cart in local
//! storage across sessions.
//!
//! # Modules
//!
//! - [`cart`] - The cart store, its pure transitions and display view
//! - [`api`] - HTTP client for stock and catalog lookups
//! - [`services`] - Lookup traits the cart depends on
//! - [`storage`] - Local key-value storage backends
//! - [`notify`] - User-facing failure messages
//! - [`config`] - Environment configuration
//! - [`state`] - Wiring of the above into one shared handle

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;

pub use cart::{CartServices, CartStore, CartView};
pub use error::{CartError, OperationError};
