//! # PagoPar Shop
//!
//! Storefront demo with PagoPar checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAGOPAR_PUBLIC_KEY=...
//! export PAGOPAR_PRIVATE_KEY=...
//!
//! # Run the server
//! pagopar-shop
//! ```

use shop_api::{routes, AppConfig, AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_logging(config.json_logs);

    let state = AppState::new(config)?;
    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());
    info!("Payment provider: {}", state.gateway.provider_name());

    if !state.config.is_production() {
        info!("Storefront: http://{}/", addr);
        info!("Checkout: POST http://{}/api/checkout", addr);
    }

    let app = routes::create_router(state);

    info!("PagoPar shop starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
