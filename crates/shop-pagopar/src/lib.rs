//! # shop-pagopar
//!
//! PagoPar payment gateway client for pagopar-shop.
//!
//! `PagoparClient` turns high-level intents into signed JSON POSTs against
//! `{base_url}/{version}{endpoint}`:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | `create_transaction` | `/pedidos/crear/` |
//! | `query_transaction` | `/pedidos/traer/` |
//! | `list_payment_methods` | `/medios-de-pago/lista/` |
//! | `create_refund` | `/reembolsos/crear/` |
//! | `create_shipment` | `/envios/crear/` |
//! | `query_shipment_status` | `/envios/estado/` |
//! | `list_cities` | `/ciudades/lista/` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_pagopar::PagoparClient;
//!
//! // Reads PAGOPAR_PUBLIC_KEY / PAGOPAR_PRIVATE_KEY
//! let client = PagoparClient::from_env()?;
//!
//! let response = client.create_transaction(&request).await?;
//! // Redirect the buyer to response.payment_url
//! ```
//!
//! Failures come back as `PaymentError::Gateway` (non-2xx response) or
//! `PaymentError::Network` (no response), never as raw transport errors.

pub mod client;
pub mod config;
pub mod logger;
pub mod signature;

// Re-exports
pub use client::PagoparClient;
pub use config::PagoparConfig;
pub use logger::{ClientLogger, SharedLogger, TracingLogger};
pub use signature::{sign, sign_payload};
