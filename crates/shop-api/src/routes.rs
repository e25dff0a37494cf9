//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  / - Storefront page
/// - GET  /health - Health check
/// - POST /api/checkout - Create a transaction, returns `{url, token_transaccion}`
/// - GET  /api/products - Catalog
/// - GET  /api/transactions/{token} - Transaction status from the gateway
/// - GET  /api/payment-methods - Enabled payment methods
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/checkout", post(handlers::checkout))
        .route("/products", get(handlers::list_products))
        .route("/transactions/{token}", get(handlers::transaction_status))
        .route("/payment-methods", get(handlers::payment_methods));

    Router::new()
        .route("/", get(handlers::storefront_page))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
