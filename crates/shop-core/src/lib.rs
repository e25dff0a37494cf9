//! # shop-core
//!
//! Core types and traits for the pagopar-shop storefront.
//!
//! This crate provides:
//! - `Product` and `ProductCatalog` for the static catalog
//! - `Cart` and `CartItem` for the in-memory cart
//! - `TransactionRequest`, `RefundRequest`, `ShipmentRequest` gateway payloads
//! - `PaymentGateway` trait implemented by payment providers
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Buyer, Cart, ProductCatalog, PurchaseItem, TransactionRequest};
//!
//! let catalog = ProductCatalog::demo();
//! let mut cart = Cart::new();
//! cart.add(catalog.get(1).unwrap().clone());
//!
//! let items = cart
//!     .items()
//!     .iter()
//!     .map(|item| PurchaseItem::single(&item.product.name, item.product.price))
//!     .collect();
//!
//! let request = TransactionRequest::product_sale(
//!     gateway.public_token(),
//!     cart.total(),
//!     items,
//!     buyer,
//!     chrono::Utc::now(),
//! );
//!
//! // Redirect the buyer to response.payment_url
//! let response = gateway.create_transaction(&request).await?;
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod product;
pub mod transaction;

// Re-exports for convenience
pub use cart::{Cart, CartItem};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{PaymentGateway, SharedGateway};
pub use product::{format_pyg, Product, ProductCatalog};
pub use transaction::{
    Buyer, PurchaseItem, RefundRequest, ShipmentItem, ShipmentRequest, TransactionRequest,
    TransactionResponse,
};
