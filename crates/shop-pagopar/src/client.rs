//! # PagoPar API Client
//!
//! Signs and sends requests to the PagoPar REST API and normalizes every
//! outcome into `PaymentResult`. Each operation validates its required
//! fields first; a validation failure never reaches the network.

use crate::config::PagoparConfig;
use crate::logger::{SharedLogger, TracingLogger};
use crate::signature::{sign_payload, SIGNATURE_FIELD};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use serde_json::{Map, Value};
use shop_core::error::{DEFAULT_GATEWAY_CODE, DEFAULT_GATEWAY_MESSAGE};
use shop_core::{
    PaymentError, PaymentGateway, PaymentResult, RefundRequest, ShipmentRequest,
    TransactionRequest, TransactionResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const CREATE_TRANSACTION: &str = "/pedidos/crear/";
const QUERY_TRANSACTION: &str = "/pedidos/traer/";
const PAYMENT_METHODS: &str = "/medios-de-pago/lista/";
const CREATE_REFUND: &str = "/reembolsos/crear/";
const CREATE_SHIPMENT: &str = "/envios/crear/";
const SHIPMENT_STATUS: &str = "/envios/estado/";
const CITIES: &str = "/ciudades/lista/";

const TRANSACTION_FIELDS: &[&str] = &[
    "token_publico",
    "monto_total",
    "tipo_pedido",
    "fecha_maxima_pago",
    "compras_items",
    "comprador",
];

const REFUND_FIELDS: &[&str] = &["token_transaccion", "monto"];

const SHIPMENT_FIELDS: &[&str] = &[
    "destinatario",
    "direccion",
    "ciudad",
    "telefono",
    "email",
    "productos",
    "monto_total",
    "peso_total",
];

/// PagoPar gateway client
///
/// Holds only its configuration, so one instance can serve any number of
/// concurrent calls.
pub struct PagoparClient {
    config: PagoparConfig,
    http: Client,
    logger: SharedLogger,
}

impl PagoparClient {
    /// Create a client. Fails if either key is missing.
    pub fn new(config: PagoparConfig) -> PaymentResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http,
            logger: Arc::new(TracingLogger),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(PagoparConfig::from_env()?)
    }

    /// Builder: replace the default `tracing` logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &PagoparConfig {
        &self.config
    }

    /// Create a payment transaction (`/pedidos/crear/`)
    #[instrument(skip(self, request), fields(total = request.total_amount, items = request.items.len()))]
    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> PaymentResult<TransactionResponse> {
        let payload = to_object(request)?;
        validate_fields(&payload, TRANSACTION_FIELDS)?;

        let url = self.config.endpoint_url(CREATE_TRANSACTION);
        let body = self.post(CREATE_TRANSACTION, payload).await?;

        let response: TransactionResponse = serde_json::from_value(body).map_err(|e| {
            let detail = format!("unexpected transaction response: {}", e);
            self.logger.error(&url, &detail);
            PaymentError::Serialization(detail)
        })?;

        info!(
            "Created PagoPar transaction: token={}",
            response.transaction_token
        );
        Ok(response)
    }

    /// Fetch the status of a transaction (`/pedidos/traer/`)
    #[instrument(skip(self))]
    pub async fn query_transaction(&self, transaction_token: &str) -> PaymentResult<Value> {
        let payload = single_field("token_transaccion", transaction_token)?;
        self.post(QUERY_TRANSACTION, payload).await
    }

    /// List enabled payment methods (`/medios-de-pago/lista/`)
    #[instrument(skip(self))]
    pub async fn list_payment_methods(&self) -> PaymentResult<Value> {
        self.post(PAYMENT_METHODS, Map::new()).await
    }

    /// Refund a transaction (`/reembolsos/crear/`)
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn create_refund(&self, request: &RefundRequest) -> PaymentResult<Value> {
        let payload = to_object(request)?;
        validate_fields(&payload, REFUND_FIELDS)?;
        self.post(CREATE_REFUND, payload).await
    }

    /// Create a shipment (`/envios/crear/`)
    #[instrument(skip(self, request), fields(products = request.products.len()))]
    pub async fn create_shipment(&self, request: &ShipmentRequest) -> PaymentResult<Value> {
        let payload = to_object(request)?;
        validate_fields(&payload, SHIPMENT_FIELDS)?;
        self.post(CREATE_SHIPMENT, payload).await
    }

    /// Fetch the status of a shipment (`/envios/estado/`)
    #[instrument(skip(self))]
    pub async fn query_shipment_status(&self, shipment_code: &str) -> PaymentResult<Value> {
        let payload = single_field("codigo_envio", shipment_code)?;
        self.post(SHIPMENT_STATUS, payload).await
    }

    /// List cities available for shipping (`/ciudades/lista/`)
    #[instrument(skip(self))]
    pub async fn list_cities(&self) -> PaymentResult<Value> {
        self.post(CITIES, Map::new()).await
    }

    /// Add `token`, sign, POST and normalize the outcome.
    async fn post(&self, endpoint: &str, mut payload: Map<String, Value>) -> PaymentResult<Value> {
        let url = self.config.endpoint_url(endpoint);

        payload.insert(
            "token".to_string(),
            Value::String(self.config.public_key.clone()),
        );
        let signature = sign_payload(&self.config.private_key, &payload);
        payload.insert(SIGNATURE_FIELD.to_string(), Value::String(signature));

        debug!("POST {} ({} fields)", url, payload.len());

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.network_failure(&url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.network_failure(&url, e))?;

        if !status.is_success() {
            self.logger.error(&url, &format!("HTTP {}: {}", status, text));
            return Err(gateway_error(status.as_u16(), &text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                let detail = format!("invalid JSON from gateway: {}", e);
                self.logger.error(&url, &detail);
                PaymentError::Serialization(detail)
            })?
        };

        self.logger.debug(&url, &body);
        Ok(body)
    }

    fn network_failure(&self, url: &str, err: reqwest::Error) -> PaymentError {
        let message = err.to_string();
        self.logger.error(url, &message);
        PaymentError::Network { message }
    }
}

#[async_trait]
impl PaymentGateway for PagoparClient {
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> PaymentResult<TransactionResponse> {
        PagoparClient::create_transaction(self, request).await
    }

    async fn query_transaction(&self, transaction_token: &str) -> PaymentResult<Value> {
        PagoparClient::query_transaction(self, transaction_token).await
    }

    async fn list_payment_methods(&self) -> PaymentResult<Value> {
        PagoparClient::list_payment_methods(self).await
    }

    fn public_token(&self) -> &str {
        &self.config.public_key
    }

    fn provider_name(&self) -> &'static str {
        "pagopar"
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn to_object<T: Serialize>(value: &T) -> PaymentResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(PaymentError::Serialization(
            "request payload is not a JSON object".to_string(),
        )),
        Err(e) => Err(PaymentError::Serialization(e.to_string())),
    }
}

fn single_field(name: &str, value: &str) -> PaymentResult<Map<String, Value>> {
    if value.is_empty() {
        return Err(PaymentError::missing(name));
    }
    let mut payload = Map::new();
    payload.insert(name.to_string(), Value::String(value.to_string()));
    Ok(payload)
}

/// Absent, null, empty string, zero, false and empty arrays all count as
/// missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(b)) => !b,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(_)) => false,
    }
}

fn validate_fields(payload: &Map<String, Value>, required: &[&str]) -> PaymentResult<()> {
    match required.iter().find(|field| is_missing(payload.get(**field))) {
        Some(field) => Err(PaymentError::missing(*field)),
        None => Ok(()),
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn gateway_error(status: u16, text: &str) -> PaymentError {
    let body = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(text).unwrap_or_else(|_| Value::String(text.to_string())))
    };

    let code = non_empty_text(body.as_ref().and_then(|b| b.get("codigo")))
        .unwrap_or_else(|| DEFAULT_GATEWAY_CODE.to_string());
    let message = non_empty_text(body.as_ref().and_then(|b| b.get("mensaje")))
        .unwrap_or_else(|| DEFAULT_GATEWAY_MESSAGE.to_string());

    PaymentError::Gateway {
        status,
        code,
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_requires_keys() {
        let err = PagoparClient::new(PagoparConfig::new("", "priv")).err().unwrap();
        assert!(matches!(err, PaymentError::Configuration(_)));

        let err = PagoparClient::new(PagoparConfig::new("pub", "")).err().unwrap();
        assert!(matches!(err, PaymentError::Configuration(_)));

        assert!(PagoparClient::new(PagoparConfig::new("pub", "priv")).is_ok());
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&json!(null))));
        assert!(is_missing(Some(&json!(""))));
        assert!(is_missing(Some(&json!(0))));
        assert!(is_missing(Some(&json!(0.0))));
        assert!(is_missing(Some(&json!(false))));
        assert!(is_missing(Some(&json!([]))));

        assert!(!is_missing(Some(&json!("x"))));
        assert!(!is_missing(Some(&json!(1))));
        assert!(!is_missing(Some(&json!([1]))));
        assert!(!is_missing(Some(&json!({}))));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let payload = match json!({"token_transaccion": "abc", "monto": 0}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let err = validate_fields(&payload, REFUND_FIELDS).unwrap_err();
        assert!(matches!(err, PaymentError::Validation { ref field } if field == "monto"));
    }

    #[test]
    fn test_gateway_error_from_body() {
        let err = gateway_error(
            400,
            r#"{"respuesta": false, "codigo": "FIRMA_INVALIDA", "mensaje": "Firma no válida"}"#,
        );
        match err {
            PaymentError::Gateway {
                status,
                code,
                message,
                body,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, "FIRMA_INVALIDA");
                assert_eq!(message, "Firma no válida");
                assert_eq!(body.unwrap()["respuesta"], false);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_gateway_error_defaults() {
        let err = gateway_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.code(), "API_ERROR");
        assert_eq!(err.to_string(), "PagoPar API error");
        assert!(matches!(
            err,
            PaymentError::Gateway { body: Some(Value::String(_)), .. }
        ));

        let err = gateway_error(500, "");
        assert!(matches!(err, PaymentError::Gateway { body: None, .. }));
    }
}
