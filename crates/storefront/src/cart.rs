//! Cart collection and derived totals.
//!
//! The cart is client-owned: created, mutated and destroyed entirely by
//! local user action, persisted under the `"cart"` key after every
//! mutation. At most one entry exists per product ID; a quantity at or
//! below zero means removal, never a stored zero entry. All operations
//! are total - malformed persisted data degrades to an empty cart rather
//! than blocking the UI.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use petal_core::{Product, ProductId};

use crate::storage::{CollectionStore, keys};

/// One cart line: a product snapshot and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product snapshot as of when it was added.
    pub product: Product,
    /// Units in the cart; always >= 1 by construction.
    pub quantity: u32,
}

/// Kind of user-visible notice raised by a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEventKind {
    /// Product entered the cart.
    Added,
    /// Product was already present; its quantity changed.
    QuantityUpdated {
        /// The new quantity.
        quantity: u32,
    },
}

/// User-visible notice raised by a cart mutation (toast payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    /// Notice identity, for dismissal.
    pub id: Uuid,
    /// Product the notice is about.
    pub product_id: ProductId,
    /// What happened.
    pub kind: CartEventKind,
}

impl CartEvent {
    fn new(product_id: ProductId, kind: CartEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            kind,
        }
    }
}

/// The cart collection, bound to its persistent store.
#[derive(Debug)]
pub struct Cart<S: CollectionStore> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: CollectionStore> Cart<S> {
    /// Load the cart from the store (once, at mount).
    pub fn load(store: S) -> Self {
        let items = store.load(keys::CART);
        Self { store, items }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product: increments the quantity if the product is already in
    /// the cart, otherwise inserts a new entry with quantity 1.
    pub fn add(&mut self, product: Product) -> CartEvent {
        let id = product.id.clone();
        let incremented = self
            .items
            .iter_mut()
            .find(|item| item.product.id == id)
            .map(|item| {
                item.quantity += 1;
                item.quantity
            });

        let event = match incremented {
            Some(quantity) => CartEvent::new(id, CartEventKind::QuantityUpdated { quantity }),
            None => {
                self.items.push(CartItem {
                    product,
                    quantity: 1,
                });
                CartEvent::new(id, CartEventKind::Added)
            }
        };
        self.persist();
        event
    }

    /// Remove the entry for `product_id`. No-op if absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Overwrite the quantity for `product_id`.
    ///
    /// A quantity at or below zero removes the entry. No-op if the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantity = quantity.min(i64::from(u32::MAX)) as u32;
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
        {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Total price, recomputed on every read.
    ///
    /// Each line resolves its numeric price through
    /// [`Price::numeric`](petal_core::Price::numeric)
    /// (raw amount preferred, display-string digits as fallback, zero on
    /// parse failure) and contributes `price * quantity`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.product.price.numeric() * Decimal::from(item.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    fn persist(&self) {
        self.store.save(keys::CART, &self.items);
    }
}
