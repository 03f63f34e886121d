//! Favorited-products set.
//!
//! Membership set keyed by product ID, with insertion order preserved for
//! display. Same persistence discipline as the cart: load once at mount,
//! save after every mutation under the `"favorites"` key.

use petal_core::{Product, ProductId};

use crate::storage::{CollectionStore, keys};

/// The favorites collection, bound to its persistent store.
#[derive(Debug)]
pub struct Favorites<S: CollectionStore> {
    store: S,
    entries: Vec<Product>,
}

impl<S: CollectionStore> Favorites<S> {
    /// Load the favorites from the store (once, at mount).
    pub fn load(store: S) -> Self {
        let entries = store.load(keys::FAVORITES);
        Self { store, entries }
    }

    /// Favorited products, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Pure membership test by product ID.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|p| &p.id == product_id)
    }

    /// Toggle membership: removes the product if present by ID, else
    /// appends it. Returns whether the product is a favorite afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        let now_favorite = if self.is_favorite(&product.id) {
            self.entries.retain(|p| p.id != product.id);
            false
        } else {
            self.entries.push(product);
            true
        };
        self.store.save(keys::FAVORITES, &self.entries);
        now_favorite
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use petal_core::{Category, Price};

    use crate::storage::MemoryStore;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_display("100"),
            image: None,
            category: Category::Bouquet,
            is_hit: false,
            is_new: false,
            in_stock: 1,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::load(MemoryStore::new());
        assert!(favorites.toggle(product("p-1")));
        assert!(favorites.is_favorite(&ProductId::new("p-1")));
        assert!(!favorites.toggle(product("p-1")));
        assert!(!favorites.is_favorite(&ProductId::new("p-1")));
    }

    #[test]
    fn test_double_toggle_is_involution() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.toggle(product("p-1"));
        favorites.toggle(product("p-2"));
        let before = favorites.entries().to_vec();

        favorites.toggle(product("p-3"));
        favorites.toggle(product("p-3"));

        assert_eq!(favorites.entries(), before.as_slice());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.toggle(product("b"));
        favorites.toggle(product("a"));
        favorites.toggle(product("c"));
        let ids: Vec<&str> = favorites.entries().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_at_most_one_entry_per_id() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.toggle(product("p-1"));
        favorites.toggle(product("p-1"));
        favorites.toggle(product("p-1"));
        assert_eq!(favorites.entries().len(), 1);
    }

    #[test]
    fn test_persists_across_loads() {
        let store = MemoryStore::new();
        {
            let mut favorites = Favorites::load(&store);
            favorites.toggle(product("p-1"));
        }
        let favorites = Favorites::load(&store);
        assert!(favorites.is_favorite(&ProductId::new("p-1")));
    }

    #[test]
    fn test_malformed_persisted_data_starts_empty() {
        let store = MemoryStore::new();
        store.seed_raw(keys::FAVORITES, "42");
        let favorites = Favorites::load(&store);
        assert!(favorites.entries().is_empty());
    }
}
