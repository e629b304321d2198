//! HTTP adapter for payment endpoints.
//!
//! Exposes the webhook receiver, the checkout endpoint and a health probe.
//!
//! # Module Structure
//!
//! - `dto` - Request/response data transfer objects
//! - `handlers` - Axum handler functions and error mapping
//! - `routes` - Router configuration

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CreatePaymentRequest, ErrorResponse, HealthResponse};
pub use handlers::{
    create_payment, handle_rbkmoney_webhook, health, GatewayAppState, PaymentApiError,
    WebhookApiError,
};
pub use routes::payment_router;
