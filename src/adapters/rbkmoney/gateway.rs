//! RBKmoney payment gateway.
//!
//! Ties together invoice request building, checkout form rendering and
//! webhook processing behind the `PaymentGateway` port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use super::checkout_form::CheckoutFormRenderer;
use super::invoice_request::InvoiceRequestBuilder;
use crate::config::{GatewayConfig, PayformConfig, ValidationError};
use crate::domain::payment::{
    CheckoutOrder, WebhookEnvelope, WebhookError, WebhookOutcome, WebhookProcessor,
    WebhookSettings,
};
use crate::ports::{
    AppCallback, CreateInvoiceRequest, CreatedInvoice, InvoiceError, PaymentGateway,
    TransactionRecorder,
};

/// Errors raised while assembling a gateway from configuration.
#[derive(Debug, Error)]
pub enum GatewaySetupError {
    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] InvoiceError),
}

pub struct RbkMoneyGateway {
    invoice_builder: InvoiceRequestBuilder,
    checkout_form: CheckoutFormRenderer,
    webhook_processor: WebhookProcessor,
}

impl RbkMoneyGateway {
    pub fn new(
        invoice_builder: InvoiceRequestBuilder,
        checkout_form: CheckoutFormRenderer,
        webhook_processor: WebhookProcessor,
    ) -> Self {
        Self {
            invoice_builder,
            checkout_form,
            webhook_processor,
        }
    }

    /// Builds a gateway for the configured shop.
    pub fn from_config(
        config: &GatewayConfig,
        payform: PayformConfig,
        recorder: Arc<dyn TransactionRecorder>,
        callback: Arc<dyn AppCallback>,
    ) -> Result<Self, GatewaySetupError> {
        let settings = WebhookSettings {
            shop_id: config.shop_id.clone(),
            verifier: config.webhook_verifier()?,
        };

        Ok(Self::new(
            InvoiceRequestBuilder::new(&config.shop_id, &config.tenant_id, &config.merchant_id),
            CheckoutFormRenderer::new(&config.checkout_url, payform)?,
            WebhookProcessor::new(settings, recorder, callback),
        ))
    }
}

#[async_trait]
impl PaymentGateway for RbkMoneyGateway {
    fn build_invoice_request(
        &self,
        order: &CheckoutOrder,
    ) -> Result<CreateInvoiceRequest, InvoiceError> {
        self.invoice_builder.build(order, Utc::now())
    }

    fn render_checkout_form(
        &self,
        invoice: &CreatedInvoice,
        order: &CheckoutOrder,
        success_url: &str,
    ) -> Result<String, InvoiceError> {
        self.checkout_form.render(invoice, &order.id, success_url)
    }

    async fn handle_webhook(
        &self,
        envelope: WebhookEnvelope<'_>,
    ) -> Result<WebhookOutcome, WebhookError> {
        self.webhook_processor.process(envelope).await
    }
}
