//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    CreatePaymentCommand, CreatePaymentHandler, CreatePaymentResult,
    HandleInvoiceWebhookCommand, HandleInvoiceWebhookHandler,
};
