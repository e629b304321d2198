//! Payment handlers.
//!
//! ## Commands
//! - Creating an invoice and its checkout form
//! - Processing gateway webhooks

mod create_payment;
mod handle_invoice_webhook;

pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult};
pub use handle_invoice_webhook::{HandleInvoiceWebhookCommand, HandleInvoiceWebhookHandler};
