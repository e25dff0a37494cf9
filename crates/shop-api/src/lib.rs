//! # shop-api
//!
//! HTTP API layer for pagopar-shop.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout endpoint backed by the PagoPar gateway
//! - Server-rendered storefront page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Storefront |
//! | GET | `/health` | Health check |
//! | POST | `/api/checkout` | Create transaction |
//! | GET | `/api/products` | List products |
//! | GET | `/api/transactions/{token}` | Transaction status |
//! | GET | `/api/payment-methods` | Payment methods |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod storefront;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
