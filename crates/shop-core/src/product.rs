//! # Product Types
//!
//! Product catalog types for the storefront.
//! Products are loaded from `config/products.toml`, falling back to the
//! built-in demo catalog.

use serde::{Deserialize, Serialize};

/// Currency symbol for Paraguayan guaraníes
pub const PYG_SYMBOL: &str = "Gs.";

/// Format an amount of guaraníes for display (e.g., "Gs. 100.000").
///
/// PYG has no minor units, so amounts are whole numbers with `.` as the
/// thousands separator.
pub fn format_pyg(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{} {}", PYG_SYMBOL, grouped)
    } else {
        format!("{} {}", PYG_SYMBOL, grouped)
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Unit price in guaraníes
    pub price: i64,

    /// Short description
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: String::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Price formatted for display
    pub fn display_price(&self) -> String {
        format_pyg(self.price)
    }
}

/// Product catalog (static, loaded once at startup)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The built-in demo catalog
    pub fn demo() -> Self {
        Self {
            products: vec![
                Product::new(1, "Producto 1", 100_000)
                    .with_description("Descripción del producto 1"),
                Product::new(2, "Producto 2", 150_000)
                    .with_description("Descripción del producto 2"),
                Product::new(3, "Producto 3", 200_000)
                    .with_description("Descripción del producto 3"),
            ],
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pyg() {
        assert_eq!(format_pyg(100_000), "Gs. 100.000");
        assert_eq!(format_pyg(1_500_000), "Gs. 1.500.000");
        assert_eq!(format_pyg(999), "Gs. 999");
        assert_eq!(format_pyg(0), "Gs. 0");
        assert_eq!(format_pyg(-2_500), "-Gs. 2.500");
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = ProductCatalog::demo();
        assert_eq!(catalog.len(), 3);

        let first = catalog.get(1).unwrap();
        assert_eq!(first.name, "Producto 1");
        assert_eq!(first.price, 100_000);
        assert_eq!(first.display_price(), "Gs. 100.000");
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn test_catalog_from_toml() {
        let toml_str = r#"
[[products]]
id = 7
name = "Yerba"
price = 25000
description = "Yerba mate 1kg"

[[products]]
id = 8
name = "Termo"
price = 180000
"#;
        let catalog = ProductCatalog::from_toml(toml_str).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(7).unwrap().description, "Yerba mate 1kg");
        assert_eq!(catalog.get(8).unwrap().description, "");
    }
}
