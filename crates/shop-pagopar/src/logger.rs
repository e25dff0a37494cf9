//! # Client Logging
//!
//! The client reports every response and failure through an injected
//! `ClientLogger`. The default implementation forwards to `tracing`; tests
//! plug in a recorder to assert on what was logged.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Logging capability used by `PagoparClient`
pub trait ClientLogger: Send + Sync {
    /// Called with the URL and parsed body of every successful response
    fn debug(&self, url: &str, payload: &Value) {
        debug!(url = %url, payload = %payload, "PagoPar API response");
    }

    /// Called with the URL and failure detail before an error is returned
    fn error(&self, url: &str, detail: &str) {
        error!(url = %url, detail = %detail, "PagoPar API error");
    }
}

/// Default logger, writes through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ClientLogger for TracingLogger {}

/// Shared logger handle
pub type SharedLogger = Arc<dyn ClientLogger>;
