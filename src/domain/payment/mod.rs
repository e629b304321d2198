//! Payment domain - Invoices, webhook authentication and transaction mapping.
//!
//! - `order_reference` - Tenant/merchant/order identifier carried in invoice metadata
//! - `signature` - `Content-Signature` verification
//! - `invoice_event` - Webhook payloads
//! - `transaction` - Canonical transaction results
//! - `webhook_processor` - Delivery pipeline

mod errors;
mod invoice_event;
mod order;
mod order_reference;
pub(crate) mod signature;
mod tax;
mod transaction;
mod webhook_processor;

pub use errors::WebhookError;
pub use invoice_event::{
    InvoiceEvent, InvoiceEventType, InvoiceMetadata, InvoicePayload, InvoiceStatus,
    WebhookPayload,
};
pub use order::{CheckoutOrder, OrderItem, Shipping};
pub use order_reference::{validate_segment, OrderReference, OrderReferenceError};
pub use signature::{
    decode_urlsafe_base64, verify, wrap_public_key, ContentSignature, ContentSignatureError,
    SignatureAlgorithm, SignatureKeyError, SignatureVerifier,
};
pub use tax::vat_rate_label;
pub use transaction::{minor_to_major, CallbackKind, TransactionResult, TransactionState};
pub use webhook_processor::{
    map_event, EventMapping, IgnoreReason, WebhookEnvelope, WebhookOutcome, WebhookProcessor,
    WebhookSettings, CONTENT_SIGNATURE_HEADER,
};
