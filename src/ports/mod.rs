//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Host Application Ports
//!
//! - `TransactionRecorder` - Stores processed transactions
//! - `AppCallback` - Notifies the host of payments and cancellations
//!
//! ## Gateway Ports
//!
//! - `InvoiceApi` - Outbound invoice creation
//! - `PaymentGateway` - Invoice request building, checkout form, webhooks

mod app_callback;
mod invoice_api;
mod payment_gateway;
mod transaction_recorder;

pub use app_callback::AppCallback;
pub use invoice_api::{
    CartLine, CreateInvoiceRequest, CreatedInvoice, InvoiceApi, InvoiceError,
    InvoiceRequestMetadata, TaxMode,
};
pub use payment_gateway::PaymentGateway;
pub use transaction_recorder::{CollaboratorError, TransactionRecorder};
