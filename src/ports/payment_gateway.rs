//! Payment gateway port.
//!
//! A gateway knows how to turn an order into an invoice request, how to
//! present the hosted checkout form for a created invoice, and how to
//! process the gateway's notifications.

use async_trait::async_trait;

use super::{CreateInvoiceRequest, CreatedInvoice, InvoiceError};
use crate::domain::payment::{CheckoutOrder, WebhookEnvelope, WebhookError, WebhookOutcome};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Builds the invoice-creation body for an order.
    fn build_invoice_request(
        &self,
        order: &CheckoutOrder,
    ) -> Result<CreateInvoiceRequest, InvoiceError>;

    /// Renders the HTML checkout form for a created invoice.
    ///
    /// The form submits to `success_url` once the customer has paid.
    fn render_checkout_form(
        &self,
        invoice: &CreatedInvoice,
        order: &CheckoutOrder,
        success_url: &str,
    ) -> Result<String, InvoiceError>;

    /// Verifies and processes one webhook delivery.
    async fn handle_webhook(
        &self,
        envelope: WebhookEnvelope<'_>,
    ) -> Result<WebhookOutcome, WebhookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }
}
