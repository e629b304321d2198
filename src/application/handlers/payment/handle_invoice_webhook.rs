//! HandleInvoiceWebhookHandler - Command handler for gateway invoice webhooks.

use std::sync::Arc;

use crate::domain::payment::{WebhookEnvelope, WebhookError, WebhookOutcome};
use crate::ports::PaymentGateway;

/// Command to handle an invoice webhook.
#[derive(Debug, Clone)]
pub struct HandleInvoiceWebhookCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
    /// `Content-Signature` header, if sent.
    pub signature: Option<String>,
}

/// Handler for processing gateway webhooks.
pub struct HandleInvoiceWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl HandleInvoiceWebhookHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: HandleInvoiceWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        let envelope = WebhookEnvelope::new(&cmd.payload, cmd.signature.as_deref());
        self.gateway.handle_webhook(envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{CheckoutOrder, IgnoreReason};
    use crate::ports::{CreateInvoiceRequest, CreatedInvoice, InvoiceError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Records what it receives; rejects deliveries without a signature.
    struct RecordingGateway {
        received: Mutex<Vec<(Vec<u8>, Option<String>)>>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        fn build_invoice_request(
            &self,
            _order: &CheckoutOrder,
        ) -> Result<CreateInvoiceRequest, InvoiceError> {
            unimplemented!()
        }

        fn render_checkout_form(
            &self,
            _invoice: &CreatedInvoice,
            _order: &CheckoutOrder,
            _success_url: &str,
        ) -> Result<String, InvoiceError> {
            unimplemented!()
        }

        async fn handle_webhook(
            &self,
            envelope: WebhookEnvelope<'_>,
        ) -> Result<WebhookOutcome, WebhookError> {
            self.received.lock().unwrap().push((
                envelope.body.to_vec(),
                envelope.content_signature.map(str::to_string),
            ));
            match envelope.content_signature {
                Some(_) => Ok(WebhookOutcome::Ignored {
                    reason: IgnoreReason::UnsupportedEventType("InvoiceCreated".to_string()),
                }),
                None => Err(WebhookError::SignatureMissing),
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn passes_payload_and_signature_through() {
        let gateway = Arc::new(RecordingGateway::new());
        let handler = HandleInvoiceWebhookHandler::new(gateway.clone());

        let outcome = handler
            .handle(HandleInvoiceWebhookCommand {
                payload: b"{}".to_vec(),
                signature: Some("alg=RS256; digest=abc".to_string()),
            })
            .await
            .unwrap();

        assert!(matches!(outcome, WebhookOutcome::Ignored { .. }));
        let received = gateway.received.lock().unwrap();
        assert_eq!(received[0].0, b"{}".to_vec());
        assert_eq!(received[0].1.as_deref(), Some("alg=RS256; digest=abc"));
    }

    #[tokio::test]
    async fn propagates_rejection() {
        let handler = HandleInvoiceWebhookHandler::new(Arc::new(RecordingGateway::new()));

        let err = handler
            .handle(HandleInvoiceWebhookCommand {
                payload: b"{}".to_vec(),
                signature: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::SignatureMissing));
    }
}
