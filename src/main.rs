use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rbkmoney_checkout::adapters::http::{app_router, GatewayAppState};
use rbkmoney_checkout::adapters::{
    InMemoryTransactionLog, RbkMoneyApiClient, RbkMoneyGateway, TracingAppCallback,
};
use rbkmoney_checkout::config::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(ConfigError::from(e).into());
    }

    let gateway = RbkMoneyGateway::from_config(
        &config.gateway,
        config.payform.clone(),
        Arc::new(InMemoryTransactionLog::new()),
        Arc::new(TracingAppCallback),
    )?;
    let invoice_api = RbkMoneyApiClient::new(
        config.gateway.api_base_url.clone(),
        config.gateway.api_key.clone(),
    );

    let state = GatewayAppState::new(Arc::new(gateway), Arc::new(invoice_api));
    let app = app_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        shop_id = %config.gateway.shop_id,
        environment = ?config.server.environment,
        "Checkout service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received, draining connections");
}
