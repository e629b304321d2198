//! RBKmoney gateway adapter.
//!
//! Implements the gateway ports for RBKmoney, including:
//! - Invoice request building (cart, tax modes, order reference metadata)
//! - Invoice creation over the REST API
//! - Hosted checkout form rendering
//! - Webhook processing
//!
//! # Security
//!
//! - Webhooks are verified against the configured public key, SHA-256 only
//! - The API key is held as `secrecy::SecretString`

mod api_client;
mod checkout_form;
mod gateway;
mod invoice_request;

pub use api_client::RbkMoneyApiClient;
pub use checkout_form::CheckoutFormRenderer;
pub use gateway::{GatewaySetupError, RbkMoneyGateway};
pub use invoice_request::{due_date, product_description, InvoiceRequestBuilder};
