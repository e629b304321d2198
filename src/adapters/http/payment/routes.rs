//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment, handle_rbkmoney_webhook, health, GatewayAppState};

/// Create the payment router.
///
/// # Routes
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhooks/rbkmoney` - Handle gateway webhooks
///
/// ## Checkout Endpoints
/// - `POST /payments/checkout` - Create invoice and render checkout form
///
/// ## Operations
/// - `GET /health` - Liveness probe
pub fn payment_router() -> Router<GatewayAppState> {
    Router::new()
        .route("/webhooks/rbkmoney", post(handle_rbkmoney_webhook))
        .route("/payments/checkout", post(create_payment))
        .route("/health", get(health))
}
