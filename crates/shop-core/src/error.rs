//! # Payment Error Types
//!
//! Typed error handling for the storefront and its payment gateway.
//! All gateway operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Error code used when the gateway does not report one
pub const DEFAULT_GATEWAY_CODE: &str = "API_ERROR";

/// Message used when the gateway does not report one
pub const DEFAULT_GATEWAY_MESSAGE: &str = "PagoPar API error";

/// Error code for transport failures
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Client could not be constructed (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required request field is absent. Raised before any network call.
    #[error("Field {field} is required")]
    Validation { field: String },

    /// The gateway answered with a non-success HTTP status
    #[error("{message}")]
    Gateway {
        status: u16,
        code: String,
        message: String,
        /// Raw response body, kept for diagnostics
        body: Option<serde_json::Value>,
    },

    /// No response could be obtained (connect failure, timeout)
    #[error("{message}")]
    Network { message: String },

    /// A success response did not have the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Shorthand for a validation error on `field`
    pub fn missing(field: impl Into<String>) -> Self {
        PaymentError::Validation {
            field: field.into(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &str {
        match self {
            PaymentError::Configuration(_) => "CONFIGURATION_ERROR",
            PaymentError::Validation { .. } => "VALIDATION_ERROR",
            PaymentError::Gateway { code, .. } => code,
            PaymentError::Network { .. } => NETWORK_ERROR_CODE,
            PaymentError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP status reported by the gateway, if the error came from a response
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PaymentError::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure happened before anything was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PaymentError::Configuration(_) | PaymentError::Validation { .. }
        )
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
