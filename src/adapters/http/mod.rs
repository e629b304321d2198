//! HTTP adapters - REST API implementations.

pub mod payment;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

// Re-export key types for convenience
pub use payment::payment_router;
pub use payment::GatewayAppState;

/// Full application router with request tracing and timeouts.
pub fn app_router(state: GatewayAppState, request_timeout: Duration) -> Router {
    payment_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
