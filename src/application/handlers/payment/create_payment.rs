//! CreatePaymentHandler - Creates a gateway invoice and renders its checkout form.

use std::sync::Arc;

use crate::domain::payment::CheckoutOrder;
use crate::ports::{CreatedInvoice, InvoiceApi, InvoiceError, PaymentGateway};

/// Command to start paying an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub order: CheckoutOrder,
    /// Where the form sends the customer after payment.
    pub success_url: String,
}

/// Result of payment creation.
#[derive(Debug, Clone)]
pub struct CreatePaymentResult {
    pub invoice: CreatedInvoice,
    /// Checkout form HTML.
    pub form_html: String,
}

/// Handler for starting payments.
pub struct CreatePaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    invoice_api: Arc<dyn InvoiceApi>,
}

impl CreatePaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, invoice_api: Arc<dyn InvoiceApi>) -> Self {
        Self {
            gateway,
            invoice_api,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentCommand,
    ) -> Result<CreatePaymentResult, InvoiceError> {
        // 1. Build invoice body
        let request = self.gateway.build_invoice_request(&cmd.order)?;

        // 2. Create invoice (no retry on failure)
        let invoice = self.invoice_api.create_invoice(&request).await?;

        // 3. Render checkout form
        let form_html = self
            .gateway
            .render_checkout_form(&invoice, &cmd.order, &cmd.success_url)?;

        Ok(CreatePaymentResult { invoice, form_html })
    }
}
