//! RocketShoes Core - Shared types library.
//!
//! This crate provides the plain data types used across RocketShoes components:
//! - `storefront` - Cart store, API client and local storage
//! - `cli` - Command-line cart tool
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, products, cart items and stock levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
