//! # PagoPar Configuration
//!
//! Configuration management for the PagoPar integration.
//! Keys are loaded from environment variables (or a `.env` file).

use shop_core::PaymentError;
use std::env;
use std::fmt;
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pagopar.com/api";

/// API version path segment
pub const DEFAULT_API_VERSION: &str = "1.2";

/// Request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// PagoPar API configuration
#[derive(Clone)]
pub struct PagoparConfig {
    /// Public key, sent with every request as `token`
    pub public_key: String,

    /// Private key, only ever used locally to compute signatures
    pub private_key: String,

    /// API base URL (override for sandboxes and tests)
    pub base_url: String,

    /// API version
    pub version: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl PagoparConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAGOPAR_PUBLIC_KEY`
    /// - `PAGOPAR_PRIVATE_KEY`
    ///
    /// Optional: `PAGOPAR_API_URL`, `PAGOPAR_API_VERSION`, `PAGOPAR_TIMEOUT_MS`
    /// (a timeout that is not a whole number of milliseconds is an error)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_key = lookup("PAGOPAR_PUBLIC_KEY").ok_or_else(|| {
            PaymentError::Configuration("PAGOPAR_PUBLIC_KEY not set".to_string())
        })?;

        let private_key = lookup("PAGOPAR_PRIVATE_KEY").ok_or_else(|| {
            PaymentError::Configuration("PAGOPAR_PRIVATE_KEY not set".to_string())
        })?;

        let mut config = Self::new(public_key, private_key);

        if let Some(url) = lookup("PAGOPAR_API_URL") {
            config.base_url = url;
        }
        if let Some(version) = lookup("PAGOPAR_API_VERSION") {
            config.version = version;
        }
        if let Some(raw) = lookup("PAGOPAR_TIMEOUT_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "PAGOPAR_TIMEOUT_MS must be a number of milliseconds, got {:?}",
                    raw
                ))
            })?;
            config.timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Create config with explicit keys and default endpoint settings
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Reject configs that cannot sign requests
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.public_key.trim().is_empty() || self.private_key.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "public and private keys are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL for an endpoint path such as `/pedidos/crear/`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.version,
            endpoint
        )
    }

    /// Builder: set custom API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set API version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for PagoparConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagoparConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PagoparConfig::new("pub", "priv");
        assert_eq!(config.base_url, "https://api.pagopar.com/api");
        assert_eq!(config.version, "1.2");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_url() {
        let config = PagoparConfig::new("pub", "priv");
        assert_eq!(
            config.endpoint_url("/pedidos/crear/"),
            "https://api.pagopar.com/api/1.2/pedidos/crear/"
        );

        let config = config
            .with_base_url("http://localhost:9999/api/")
            .with_version("2.0");
        assert_eq!(
            config.endpoint_url("/ciudades/lista/"),
            "http://localhost:9999/api/2.0/ciudades/lista/"
        );
    }

    #[test]
    fn test_missing_keys_rejected() {
        assert!(PagoparConfig::new("", "priv").validate().is_err());
        assert!(PagoparConfig::new("pub", "").validate().is_err());
        assert!(PagoparConfig::new("  ", "priv").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = PagoparConfig::new("pub_123", "very_secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("pub_123"));
        assert!(!debug.contains("very_secret"));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_lookup_missing_key() {
        let result = PagoparConfig::from_lookup(vars(&[("PAGOPAR_PRIVATE_KEY", "priv")]));
        match result {
            Err(PaymentError::Configuration(msg)) => assert!(msg.contains("PAGOPAR_PUBLIC_KEY")),
            other => panic!("expected configuration error, got {:?}", other),
        }

        let result = PagoparConfig::from_lookup(vars(&[("PAGOPAR_PUBLIC_KEY", "pub")]));
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn test_lookup_defaults() {
        let config = PagoparConfig::from_lookup(vars(&[
            ("PAGOPAR_PUBLIC_KEY", "pub"),
            ("PAGOPAR_PRIVATE_KEY", "priv"),
        ]))
        .unwrap();

        assert_eq!(config.public_key, "pub");
        assert_eq!(config.private_key, "priv");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = PagoparConfig::from_lookup(vars(&[
            ("PAGOPAR_PUBLIC_KEY", "pub"),
            ("PAGOPAR_PRIVATE_KEY", "priv"),
            ("PAGOPAR_API_URL", "http://sandbox.local/api"),
            ("PAGOPAR_API_VERSION", "2.0"),
            ("PAGOPAR_TIMEOUT_MS", " 2500 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://sandbox.local/api");
        assert_eq!(config.version, "2.0");
        assert_eq!(config.timeout, Duration::from_millis(2_500));
        assert_eq!(
            config.endpoint_url("/pedidos/traer/"),
            "http://sandbox.local/api/2.0/pedidos/traer/"
        );
    }

    #[test]
    fn test_lookup_rejects_bad_timeout() {
        for raw in ["10s", "", "-5"] {
            let result = PagoparConfig::from_lookup(vars(&[
                ("PAGOPAR_PUBLIC_KEY", "pub"),
                ("PAGOPAR_PRIVATE_KEY", "priv"),
                ("PAGOPAR_TIMEOUT_MS", raw),
            ]));
            match result {
                Err(PaymentError::Configuration(msg)) => {
                    assert!(msg.contains("PAGOPAR_TIMEOUT_MS"))
                }
                other => panic!("expected configuration error for {:?}, got {:?}", raw, other),
            }
        }
    }
}
