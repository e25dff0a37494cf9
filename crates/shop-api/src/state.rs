//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment gateway, the product catalog and server configuration.
//! The gateway is built once at startup and injected here.

use shop_core::{ProductCatalog, SharedGateway};
use shop_pagopar::PagoparClient;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            json_logs: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: SharedGateway,
    /// Product catalog
    pub catalog: ProductCatalog,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state for `config`: PagoPar keys from the environment, catalog from file
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = load_product_catalog()?;

        let client = PagoparClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize PagoPar: {}", e))?;

        Ok(Self::with_gateway(Arc::new(client), catalog, config))
    }

    /// Build state around an existing gateway
    pub fn with_gateway(gateway: SharedGateway, catalog: ProductCatalog, config: AppConfig) -> Self {
        Self {
            gateway,
            catalog,
            config,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using built-in demo catalog");
    Ok(ProductCatalog::demo())
}
