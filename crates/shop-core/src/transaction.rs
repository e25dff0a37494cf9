//! # Gateway Request Types
//!
//! Transaction, refund and shipment payloads sent to the payment gateway.
//! Field names on the wire follow the gateway's (Spanish) API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Order type tag for regular product sales
pub const ORDER_TYPE_PRODUCT_SALE: &str = "venta_productos";

/// How long the buyer has to complete payment
pub const PAYMENT_WINDOW_HOURS: i64 = 24;

/// Fixed wire format for timestamps: ISO 8601, UTC, millisecond precision
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Buyer details, entered once per checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "documento")]
    pub document: String,
}

/// A purchased line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio")]
    pub price: i64,
}

impl PurchaseItem {
    /// One unit of a product. Cart lines are never merged, so checkout
    /// always sends quantity 1.
    pub fn single(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            quantity: 1,
            price,
        }
    }
}

/// Payload for creating a gateway transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "token_publico")]
    pub public_token: String,

    #[serde(rename = "monto_total")]
    pub total_amount: i64,

    #[serde(rename = "tipo_pedido")]
    pub order_type: String,

    #[serde(rename = "fecha_maxima_pago", with = "iso8601")]
    pub payment_deadline: DateTime<Utc>,

    #[serde(rename = "compras_items")]
    pub items: Vec<PurchaseItem>,

    #[serde(rename = "comprador")]
    pub buyer: Buyer,

    /// Merchant-side order reference
    #[serde(
        rename = "id_pedido_comercio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub order_reference: Option<String>,
}

impl TransactionRequest {
    /// Build a product-sale transaction that expires
    /// `PAYMENT_WINDOW_HOURS` after `now`.
    pub fn product_sale(
        public_token: impl Into<String>,
        total_amount: i64,
        items: Vec<PurchaseItem>,
        buyer: Buyer,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            public_token: public_token.into(),
            total_amount,
            order_type: ORDER_TYPE_PRODUCT_SALE.to_string(),
            payment_deadline: now + Duration::hours(PAYMENT_WINDOW_HOURS),
            items,
            buyer,
            order_reference: None,
        }
    }

    /// Builder: set the merchant order reference
    pub fn with_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.order_reference = Some(reference.into());
        self
    }

    /// Sum of `price * quantity` over the line items
    pub fn items_total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * item.quantity as i64)
            .sum()
    }
}

/// What the gateway hands back for a created transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Hosted payment page the buyer is redirected to
    #[serde(rename = "url_pago")]
    pub payment_url: String,

    #[serde(rename = "token_transaccion")]
    pub transaction_token: String,
}

/// Payload for refunding a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    #[serde(rename = "token_transaccion")]
    pub transaction_token: String,

    #[serde(rename = "monto")]
    pub amount: i64,
}

impl RefundRequest {
    pub fn new(transaction_token: impl Into<String>, amount: i64) -> Self {
        Self {
            transaction_token: transaction_token.into(),
            amount,
        }
    }
}

/// A product included in a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    /// Weight in kilograms
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "precio")]
    pub price: i64,
}

/// Payload for creating a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    #[serde(rename = "destinatario")]
    pub recipient: String,

    #[serde(rename = "direccion")]
    pub address: String,

    #[serde(rename = "ciudad")]
    pub city: String,

    #[serde(rename = "telefono")]
    pub phone: String,

    pub email: String,

    #[serde(rename = "productos")]
    pub products: Vec<ShipmentItem>,

    #[serde(rename = "monto_total")]
    pub total_amount: i64,

    /// Total weight in kilograms
    #[serde(rename = "peso_total")]
    pub total_weight: f64,
}
