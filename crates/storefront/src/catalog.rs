//! Catalog filtering and presentation.
//!
//! The gateway serves the catalog unfiltered; the storefront decides what
//! is listed. Category display names come only from `Category::label` in
//! `petal-core` so the two mini-apps cannot drift apart.

use petal_core::Product;

/// Products listed on the storefront: bouquets with stock on hand.
#[must_use]
pub fn sellable_bouquets(catalog: &[Product]) -> Vec<&Product> {
    catalog
        .iter()
        .filter(|p| p.category.is_sellable() && p.in_stock > 0)
        .collect()
}

/// Raw ingredient products, for the assembly views of the admin panel.
#[must_use]
pub fn ingredients(catalog: &[Product]) -> Vec<&Product> {
    catalog
        .iter()
        .filter(|p| !p.category.is_sellable())
        .collect()
}

/// Featured subsets of the sellable catalog.
#[must_use]
pub fn hits(catalog: &[Product]) -> Vec<&Product> {
    sellable_bouquets(catalog)
        .into_iter()
        .filter(|p| p.is_hit)
        .collect()
}

/// New arrivals among the sellable catalog.
#[must_use]
pub fn new_arrivals(catalog: &[Product]) -> Vec<&Product> {
    sellable_bouquets(catalog)
        .into_iter()
        .filter(|p| p.is_new)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use petal_core::{Category, Price, ProductId};

    fn product(id: &str, category: Category, in_stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_display("100"),
            image: None,
            category,
            is_hit: false,
            is_new: false,
            in_stock,
        }
    }

    #[test]
    fn test_sellable_excludes_ingredients_and_out_of_stock() {
        let catalog = vec![
            product("b-1", Category::Bouquet, 5),
            product("b-2", Category::Bouquet, 0),
            product("i-1", Category::Ingredient, 50),
        ];
        let listed = sellable_bouquets(&catalog);
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b-1"]);
    }

    #[test]
    fn test_ingredients_filter() {
        let catalog = vec![
            product("b-1", Category::Bouquet, 5),
            product("i-1", Category::Ingredient, 0),
        ];
        let ids: Vec<&str> = ingredients(&catalog).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["i-1"]);
    }

    #[test]
    fn test_featured_shelves() {
        let mut hit = product("b-1", Category::Bouquet, 5);
        hit.is_hit = true;
        let mut fresh = product("b-2", Category::Bouquet, 5);
        fresh.is_new = true;
        let catalog = vec![hit, fresh, product("b-3", Category::Bouquet, 5)];

        assert_eq!(hits(&catalog).len(), 1);
        assert_eq!(new_arrivals(&catalog).len(), 1);
    }
}
