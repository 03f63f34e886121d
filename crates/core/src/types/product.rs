//! Catalog product projection.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::ProductId;
use super::price::Price;

/// A catalog product as served by the backend.
///
/// Immutable from the client's perspective; the storefront and admin apps
/// hold read-only projections refreshed by full reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price (raw amount and/or pre-formatted display string).
    pub price: Price,
    /// Product image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category (bouquet vs. raw ingredient).
    #[serde(default)]
    pub category: Category,
    /// Featured on the "hits" shelf.
    #[serde(default)]
    pub is_hit: bool,
    /// Featured on the "new arrivals" shelf.
    #[serde(default)]
    pub is_new: bool,
    /// Units currently in stock.
    #[serde(default)]
    pub in_stock: u32,
}
