//! Webhook error types for gateway notifications.
//!
//! Every rejection carries a message that is returned to the gateway as
//! `{"message": ...}` together with the mapped HTTP status.

use axum::http::StatusCode;
use thiserror::Error;

use super::order_reference::OrderReferenceError;

/// Errors that occur while processing an invoice webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No `Content-Signature` header, or a blank one.
    #[error("Webhook notification signature missing")]
    SignatureMissing,

    /// The signature header lacks `alg` or `digest`.
    #[error("Missing required parameter {0}")]
    MissingSignatureParameter(&'static str),

    /// The digest does not verify against the configured key.
    #[error("Webhook notification signature mismatch")]
    SignatureMismatch,

    /// Body is not JSON or lacks invoice id, amount, currency or shop id.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The invoice belongs to another shop.
    #[error("Shop ID is missing")]
    ShopIdMismatch,

    /// `invoice.metadata.order_id` is absent or blank.
    #[error("Order ID is missing")]
    OrderIdMissing,

    /// `invoice.metadata.order_id` cannot be decoded.
    #[error("Order ID is missing: {0}")]
    InvalidOrderReference(#[from] OrderReferenceError),

    /// A settled invoice reports a non-positive amount.
    #[error("Amount is missing")]
    AmountMissing,

    /// The transaction recorder failed.
    #[error("Transaction recording failed: {0}")]
    Recording(String),

    /// The application callback failed.
    #[error("Application callback failed: {0}")]
    Callback(String),
}

impl WebhookError {
    /// Returns true for rejections caused by the request itself.
    ///
    /// Validation failures will fail again on redelivery; everything else is
    /// a processing fault the gateway should retry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WebhookError::SignatureMissing
                | WebhookError::MissingSignatureParameter(_)
                | WebhookError::SignatureMismatch
                | WebhookError::MalformedPayload(_)
                | WebhookError::ShopIdMismatch
                | WebhookError::OrderIdMissing
                | WebhookError::InvalidOrderReference(_)
        )
    }

    /// Maps the error to the HTTP status returned to the gateway.
    ///
    /// - 400: validation failure, the gateway should not retry
    /// - 500: processing fault, the gateway redelivers
    pub fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Message for the response body.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Error Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signature_missing_displays_correctly() {
        let err = WebhookError::SignatureMissing;
        assert_eq!(err.message(), "Webhook notification signature missing");
    }

    #[test]
    fn missing_parameter_names_parameter() {
        let err = WebhookError::MissingSignatureParameter("digest");
        assert_eq!(err.message(), "Missing required parameter digest");
    }

    #[test]
    fn signature_mismatch_displays_correctly() {
        let err = WebhookError::SignatureMismatch;
        assert_eq!(format!("{}", err), "Webhook notification signature mismatch");
    }

    #[test]
    fn invalid_reference_includes_reason() {
        let err: WebhookError = OrderReferenceError::InvalidReference("x".to_string()).into();
        assert_eq!(
            err.message(),
            "Order ID is missing: Invalid order reference: x"
        );
    }

    #[test]
    fn amount_missing_displays_correctly() {
        assert_eq!(WebhookError::AmountMissing.message(), "Amount is missing");
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn validation_errors_return_bad_request() {
        let errors = [
            WebhookError::SignatureMissing,
            WebhookError::MissingSignatureParameter("alg"),
            WebhookError::SignatureMismatch,
            WebhookError::MalformedPayload("bad json".to_string()),
            WebhookError::ShopIdMismatch,
            WebhookError::OrderIdMissing,
            WebhookError::InvalidOrderReference(OrderReferenceError::EmptyOrderId),
        ];

        for err in errors {
            assert!(err.is_validation(), "{err} should be a validation error");
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn amount_missing_returns_internal_error() {
        let err = WebhookError::AmountMissing;
        assert!(!err.is_validation());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn collaborator_failures_return_internal_error() {
        assert_eq!(
            WebhookError::Recording("db down".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WebhookError::Callback("host error".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
