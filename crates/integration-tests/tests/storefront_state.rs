//! Storefront state integration: cart and favorites sharing one
//! file-backed store across simulated sessions.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use petal_core::ProductId;
use petal_integration_tests::bouquet;
use petal_storefront::{Cart, Favorites, FileStore};

// =============================================================================
// Cross-session persistence
// =============================================================================

#[test]
fn test_cart_survives_session_restart() {
    petal_integration_tests::init_logging();
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::new(dir.path());
        let mut cart = Cart::load(store);
        cart.add(bouquet("p-1", 50_000, 5));
        cart.add(bouquet("p-1", 50_000, 5));
        cart.add(bouquet("p-2", 1_200, 3));
    }

    // New session, same data directory.
    let store = FileStore::new(dir.path());
    let cart = Cart::load(store);
    assert_eq!(cart.total_quantity(), 3);
    assert_eq!(cart.total_price(), Decimal::from(101_200));
}

#[test]
fn test_cart_and_favorites_are_independent_collections() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let mut cart = Cart::load(&store);
    let mut favorites = Favorites::load(&store);

    cart.add(bouquet("p-1", 100, 5));
    favorites.toggle(bouquet("p-2", 200, 5));
    cart.clear();

    // Clearing the cart never touches the favorites key.
    let favorites = Favorites::load(&store);
    assert!(favorites.is_favorite(&ProductId::new("p-2")));
    let cart = Cart::load(&store);
    assert!(cart.is_empty());
}

#[test]
fn test_corrupt_cart_file_degrades_to_empty_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{ definitely not json").unwrap();
    std::fs::write(dir.path().join("favorites.json"), "[]").unwrap();

    let store = FileStore::new(dir.path());
    let mut cart = Cart::load(&store);
    assert!(cart.is_empty());

    // The session continues normally and the next save repairs the file.
    cart.add(bouquet("p-1", 100, 5));
    let reloaded = Cart::load(&store);
    assert_eq!(reloaded.total_quantity(), 1);
}

// =============================================================================
// Aggregation invariants
// =============================================================================

#[test]
fn test_total_price_recomputed_after_every_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let mut cart = Cart::load(store);

    cart.add(bouquet("p-1", 50_000, 5));
    assert_eq!(cart.total_price(), Decimal::from(50_000));

    cart.add(bouquet("p-1", 50_000, 5));
    cart.add(bouquet("p-1", 50_000, 5));
    assert_eq!(cart.total_price(), Decimal::from(150_000));

    cart.update_quantity(&ProductId::new("p-1"), 1);
    assert_eq!(cart.total_price(), Decimal::from(50_000));

    cart.update_quantity(&ProductId::new("p-1"), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
}
