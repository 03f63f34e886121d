//! Petal Storefront - client-owned state for the flower-shop mini-app.
//!
//! The storefront surface holds exactly two client-owned collections -
//! the cart and the favorites set - persisted as JSON under named keys,
//! plus pure catalog presentation helpers. Orders and products stay
//! server-owned; they enter this crate only as read-only projections.
//!
//! # Modules
//!
//! - [`storage`] - Load-on-mount / save-on-change persistence
//! - [`cart`] - Cart collection and derived totals
//! - [`favorites`] - Favorited-products set
//! - [`catalog`] - Catalog filtering and presentation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod storage;

pub use cart::{Cart, CartEvent, CartEventKind, CartItem};
pub use catalog::{hits, ingredients, new_arrivals, sellable_bouquets};
pub use favorites::Favorites;
pub use storage::{CollectionStore, FileStore, MemoryStore};
