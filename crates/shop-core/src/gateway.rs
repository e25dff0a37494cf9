//! # Payment Gateway Trait
//!
//! Seam between the storefront and the payment provider. The HTTP layer
//! only talks to `PaymentGateway`; the PagoPar client implements it and
//! tests substitute a fake.
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────────────┐      ┌──────────────┐
//! │ checkout     │ ───▶ │ PaymentGateway (trait)   │ ◀─── │ PagoparClient│
//! │ handler      │      │  ├── create_transaction()│      └──────────────┘
//! └──────────────┘      │  ├── query_transaction() │
//!                       │  └── list_payment_methods│
//!                       └──────────────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::transaction::{TransactionRequest, TransactionResponse};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a transaction and return the hosted payment URL and token.
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> PaymentResult<TransactionResponse>;

    /// Fetch the current status payload of a transaction.
    async fn query_transaction(&self, transaction_token: &str)
        -> PaymentResult<serde_json::Value>;

    /// List the payment methods enabled for the merchant.
    async fn list_payment_methods(&self) -> PaymentResult<serde_json::Value>;

    /// Public key identifying the merchant (sent as `token_publico`).
    fn public_token(&self) -> &str;

    /// Provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Shared, dynamically dispatched gateway
pub type SharedGateway = Arc<dyn PaymentGateway>;
