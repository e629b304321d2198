//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};

use crate::application::handlers::payment::{
    CreatePaymentCommand, CreatePaymentHandler, HandleInvoiceWebhookCommand,
    HandleInvoiceWebhookHandler,
};
use crate::domain::payment::{WebhookError, CONTENT_SIGNATURE_HEADER};
use crate::ports::{InvoiceApi, InvoiceError, PaymentGateway};

use super::dto::{CreatePaymentRequest, ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for payment routes.
#[derive(Clone)]
pub struct GatewayAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub invoice_api: Arc<dyn InvoiceApi>,
}

impl GatewayAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>, invoice_api: Arc<dyn InvoiceApi>) -> Self {
        Self {
            gateway,
            invoice_api,
        }
    }

    pub fn webhook_handler(&self) -> HandleInvoiceWebhookHandler {
        HandleInvoiceWebhookHandler::new(self.gateway.clone())
    }

    pub fn create_payment_handler(&self) -> CreatePaymentHandler {
        CreatePaymentHandler::new(self.gateway.clone(), self.invoice_api.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/rbkmoney - Handle gateway webhook events
pub async fn handle_rbkmoney_webhook(
    State(state): State<GatewayAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    let signature = headers
        .get(CONTENT_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleInvoiceWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(StatusCode::OK)
}

/// POST /payments/checkout - Create an invoice and return its checkout form
pub async fn create_payment(
    State(state): State<GatewayAppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Html<String>, PaymentApiError> {
    let cmd = CreatePaymentCommand {
        order: request.order,
        success_url: request.success_url,
    };

    let result = state.create_payment_handler().handle(cmd).await?;

    Ok(Html(result.form_html))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Converts webhook rejections to HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        let body = ErrorResponse::new(self.0.message());
        (status, Json(body)).into_response()
    }
}

/// Converts invoice creation failures to HTTP responses.
///
/// Upstream details stay in the logs; callers get a generic message.
pub struct PaymentApiError(InvoiceError);

impl From<InvoiceError> for PaymentApiError {
    fn from(err: InvoiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            InvoiceError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoiceError::Network(_)
            | InvoiceError::UnexpectedStatus { .. }
            | InvoiceError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            InvoiceError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(error = %self.0, status = status.as_u16(), "Payment creation failed");

        let body = ErrorResponse::new(self.0.public_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_validation_error_maps_to_bad_request() {
        let response = WebhookApiError::from(WebhookError::ShopIdMismatch).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn amount_missing_maps_to_internal_error() {
        let response = WebhookApiError::from(WebhookError::AmountMissing).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_failure_maps_to_bad_gateway() {
        let response = PaymentApiError::from(InvoiceError::UnexpectedStatus {
            status: 500,
            body: String::new(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_order_maps_to_bad_request() {
        let response =
            PaymentApiError::from(InvoiceError::Validation("Amount must be set".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
