//! # shop-wasm
//!
//! WebAssembly bindings for the storefront cart.
//!
//! This crate provides WASM-compatible functions for:
//! - Keeping the cart in the browser
//! - Totals and PYG price formatting
//! - Building the `/api/checkout` request body
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCart, format_price } from 'shop-wasm';
//!
//! await init();
//!
//! const cart = new WasmCart();
//! cart.add_product(1, 'Producto 1', 100000, 'Descripción del producto 1');
//!
//! console.log('Total:', cart.format_total()); // "Gs. 100.000"
//!
//! const body = cart.checkout_payload('Ana', 'a@x.com', '0981000000', '1234567');
//! await fetch('/api/checkout', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use serde::Serialize;
use shop_core::{format_pyg, Cart, CartItem, Product};
use wasm_bindgen::prelude::*;

/// Browser-side cart
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WasmCart {
    cart: Cart,
}

/// Body posted to `/api/checkout`
#[derive(Serialize)]
struct CheckoutPayload<'a> {
    nombre: &'a str,
    email: &'a str,
    telefono: &'a str,
    documento: &'a str,
    items: &'a [CartItem],
    monto_total: i64,
}

#[wasm_bindgen]
impl WasmCart {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product and return its cart id
    pub fn add_product(&mut self, id: u32, name: String, price: i64, description: String) -> u64 {
        self.cart
            .add(Product::new(id, name, price).with_description(description))
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Cart total in guaraníes
    pub fn total(&self) -> i64 {
        self.cart.total()
    }

    /// Cart total formatted for display
    pub fn format_total(&self) -> String {
        self.cart.display_total()
    }

    /// Whether the checkout button should be enabled
    pub fn can_checkout(&self) -> bool {
        self.cart.can_checkout()
    }

    /// Discard the whole cart
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Items as a JSON array (product fields plus `cartId`)
    pub fn items_json(&self) -> String {
        serde_json::to_string(self.cart.items()).unwrap_or_else(|_| "[]".to_string())
    }

    /// JSON body for `/api/checkout`
    pub fn checkout_payload(
        &self,
        nombre: &str,
        email: &str,
        telefono: &str,
        documento: &str,
    ) -> String {
        let payload = CheckoutPayload {
            nombre,
            email,
            telefono,
            documento,
            items: self.cart.items(),
            monto_total: self.cart.total(),
        };
        serde_json::to_string(&payload).unwrap_or_default()
    }
}

/// Format an amount of guaraníes for display
#[wasm_bindgen]
pub fn format_price(amount: i64) -> String {
    format_pyg(amount)
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total() {
        let mut cart = WasmCart::new();
        assert!(!cart.can_checkout());

        cart.add_product(1, "Producto 1".into(), 100_000, "Uno".into());
        cart.add_product(2, "Producto 2".into(), 150_000, "Dos".into());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 250_000);
        assert_eq!(cart.format_total(), "Gs. 250.000");
        assert!(cart.can_checkout());
    }

    #[test]
    fn test_same_product_twice_gets_distinct_ids() {
        let mut cart = WasmCart::new();
        let a = cart.add_product(1, "Producto 1".into(), 100_000, String::new());
        let b = cart.add_product(1, "Producto 1".into(), 100_000, String::new());
        assert_ne!(a, b);

        let items: serde_json::Value = serde_json::from_str(&cart.items_json()).unwrap();
        assert_eq!(items[0]["cartId"], a);
        assert_eq!(items[1]["cartId"], b);
    }

    #[test]
    fn test_checkout_payload() {
        let mut cart = WasmCart::new();
        cart.add_product(1, "Producto 1".into(), 100_000, "Uno".into());

        let payload: serde_json::Value =
            serde_json::from_str(&cart.checkout_payload("Ana", "a@x.com", "0981000000", "1234567"))
                .unwrap();

        assert_eq!(payload["nombre"], "Ana");
        assert_eq!(payload["documento"], "1234567");
        assert_eq!(payload["monto_total"], 100_000);
        assert_eq!(payload["items"][0]["name"], "Producto 1");
        assert_eq!(payload["items"][0]["price"], 100_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = WasmCart::new();
        cart.add_product(3, "Producto 3".into(), 200_000, String::new());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.items_json(), "[]");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(200_000), "Gs. 200.000");
    }
}
