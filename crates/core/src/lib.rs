//! Petal Core - Shared types library.
//!
//! This crate provides common types used across all Petal components:
//! - `storefront` - Customer-facing flower shop mini-app state
//! - `admin` - Warehouse/order-management panel state
//! - `gateway` - Typed client for the backend HTTP API
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no timers. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, orders, and identities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
