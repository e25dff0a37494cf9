//! # Cart
//!
//! In-memory shopping cart. Items are appended and never mutated; the only
//! way to remove them is to clear the whole cart.
//!
//! The storefront page's inline script keeps an equivalent cart in the
//! browser; both number items from 1 with a per-cart counter.

use crate::product::{format_pyg, Product};
use serde::{Deserialize, Serialize};

/// A product placed in the cart, tagged with a cart-scoped id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique within the owning cart
    #[serde(rename = "cartId")]
    pub cart_id: u64,

    #[serde(flatten)]
    pub product: Product,
}

/// Shopping cart
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(skip)]
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product and return the id assigned to the new item.
    ///
    /// Ids come from a monotonic counter, so rapid successive additions of
    /// the same product still get distinct ids.
    pub fn add(&mut self, product: Product) -> u64 {
        self.next_id += 1;
        let cart_id = self.next_id;
        self.items.push(CartItem { cart_id, product });
        cart_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices in guaraníes
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.product.price).sum()
    }

    pub fn display_total(&self) -> String {
        format_pyg(self.total())
    }

    /// Checkout is only offered for a non-empty cart
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }

    /// Discard every item. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductCatalog;
    use std::collections::HashSet;

    #[test]
    fn test_cart_total() {
        let catalog = ProductCatalog::demo();
        let mut cart = Cart::new();
        cart.add(catalog.get(1).unwrap().clone());
        cart.add(catalog.get(2).unwrap().clone());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 250_000);
        assert_eq!(cart.display_total(), "Gs. 250.000");
    }

    #[test]
    fn test_rapid_additions_get_unique_ids() {
        let product = Product::new(1, "Producto 1", 100_000);
        let mut cart = Cart::new();

        let ids: HashSet<u64> = (0..1_000).map(|_| cart.add(product.clone())).collect();

        assert_eq!(ids.len(), 1_000);
        assert_eq!(cart.len(), 1_000);
    }

    #[test]
    fn test_empty_cart_cannot_checkout() {
        let mut cart = Cart::new();
        assert!(!cart.can_checkout());

        let first = cart.add(Product::new(3, "Producto 3", 200_000));
        assert!(cart.can_checkout());

        cart.clear();
        assert!(!cart.can_checkout());
        assert_eq!(cart.total(), 0);

        let second = cart.add(Product::new(3, "Producto 3", 200_000));
        assert_ne!(first, second);
    }

    #[test]
    fn test_cart_item_wire_shape() {
        let mut cart = Cart::new();
        cart.add(Product::new(1, "Producto 1", 100_000).with_description("Uno"));

        let value = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(value["cartId"], 1);
        assert_eq!(value["name"], "Producto 1");
        assert_eq!(value["price"], 100_000);
        assert_eq!(value["description"], "Uno");
    }
}
