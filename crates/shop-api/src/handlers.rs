//! # Request Handlers
//!
//! Axum request handlers for the storefront API.
//! Checkout builds a PagoPar transaction from the cart and hands back the
//! hosted payment URL for the browser to redirect to.

use crate::state::AppState;
use crate::storefront;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shop_core::{Buyer, PaymentError, PurchaseItem, TransactionRequest};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Message returned when an error carries no text of its own
const GENERIC_CHECKOUT_ERROR: &str = "Error processing payment";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Checkout form submission: buyer fields, cart items and total
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub documento: String,
    /// Cart entries; extra fields (`id`, `description`, `cartId`) are ignored
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub monto_total: i64,
}

/// Item in checkout request
#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: i64,
}

/// Checkout response: where to send the browser
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
    pub token_transaccion: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Every checkout failure is reported to the browser as a 500 with its
/// message; error kinds are not distinguished.
fn internal_error(message: String) -> ApiError {
    let message = if message.is_empty() {
        GENERIC_CHECKOUT_ERROR.to_string()
    } else {
        message
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}

fn payment_error_to_response(err: PaymentError) -> ApiError {
    if err.is_local() {
        warn!("Request rejected before reaching the gateway: {}", err);
    } else {
        error!("Gateway call failed: {}", err);
    }
    internal_error(err.to_string())
}

/// An unreadable checkout body gets the same `{error}` shape as a gateway
/// failure, so the storefront script can always read `error`.
fn rejection_to_response(rejection: JsonRejection) -> ApiError {
    warn!("Malformed checkout body: {}", rejection.body_text());
    internal_error(rejection.body_text())
}

/// Build the gateway transaction for a checkout submission
pub fn build_transaction(
    public_token: &str,
    request: &CheckoutRequest,
    now: DateTime<Utc>,
) -> TransactionRequest {
    let items = request
        .items
        .iter()
        .map(|item| PurchaseItem::single(&item.name, item.price))
        .collect();

    let buyer = Buyer {
        name: request.nombre.clone(),
        email: request.email.clone(),
        phone: request.telefono.clone(),
        document: request.documento.clone(),
    };

    TransactionRequest::product_sale(public_token, request.monto_total, items, buyer, now)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pagopar-shop",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Storefront page
pub async fn storefront_page(State(state): State<AppState>) -> Html<String> {
    Html(storefront::render(&state.catalog))
}

/// Get products list
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "products": state.catalog.products,
        "count": state.catalog.len()
    }))
}

/// Create a gateway transaction for the submitted cart
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_response)?;

    let order_reference = Uuid::new_v4().to_string();
    let transaction = build_transaction(state.gateway.public_token(), &request, Utc::now())
        .with_order_reference(&order_reference);

    let items_total = transaction.items_total();
    if items_total != transaction.total_amount {
        warn!(
            "Checkout total {} differs from item sum {} (order={})",
            transaction.total_amount, items_total, order_reference
        );
    }

    info!(
        "Creating {} transaction: order={}, {} items, total={}",
        state.gateway.provider_name(),
        order_reference,
        transaction.items.len(),
        transaction.total_amount
    );

    let response = state
        .gateway
        .create_transaction(&transaction)
        .await
        .map_err(payment_error_to_response)?;

    info!(
        "Created transaction: order={}, token={}",
        order_reference, response.transaction_token
    );

    Ok(Json(CheckoutResponse {
        url: response.payment_url,
        token_transaccion: response.transaction_token,
    }))
}

/// Current gateway status of a transaction
#[instrument(skip(state))]
pub async fn transaction_status(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .gateway
        .query_transaction(&token)
        .await
        .map(Json)
        .map_err(payment_error_to_response)
}

/// Payment methods enabled for the merchant
pub async fn payment_methods(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .gateway
        .list_payment_methods()
        .await
        .map(Json)
        .map_err(payment_error_to_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ana_checkout() -> CheckoutRequest {
        serde_json::from_value(serde_json::json!({
            "nombre": "Ana",
            "email": "a@x.com",
            "telefono": "0981000000",
            "documento": "1234567",
            "items": [
                {"id": 1, "name": "Producto 1", "price": 100000, "description": "Uno", "cartId": 1}
            ],
            "monto_total": 100000
        }))
        .unwrap()
    }

    #[test]
    fn test_build_transaction() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let tx = build_transaction("pub", &ana_checkout(), now);

        assert_eq!(tx.public_token, "pub");
        assert_eq!(tx.total_amount, 100_000);
        assert_eq!(tx.order_type, "venta_productos");
        assert_eq!(tx.payment_deadline, now + Duration::hours(24));
        assert_eq!(tx.items.len(), 1);
        assert_eq!(tx.items[0].quantity, 1);
        assert_eq!(tx.items[0].price, 100_000);
        assert_eq!(tx.buyer.name, "Ana");
        assert_eq!(tx.buyer.document, "1234567");
    }

    #[test]
    fn test_missing_fields_default() {
        let request: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(request.items.is_empty());
        assert_eq!(request.monto_total, 0);
    }

    #[test]
    fn test_every_error_is_500() {
        let (status, Json(body)) = payment_error_to_response(PaymentError::missing("monto_total"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Field monto_total is required");

        let (status, Json(body)) = payment_error_to_response(PaymentError::Gateway {
            status: 400,
            code: "X".into(),
            message: "Pedido inválido".into(),
            body: None,
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Pedido inválido");

        let (_, Json(body)) = payment_error_to_response(PaymentError::Network {
            message: String::new(),
        });
        assert_eq!(body.error, GENERIC_CHECKOUT_ERROR);
    }
}
