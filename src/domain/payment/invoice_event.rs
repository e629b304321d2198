//! Invoice webhook payloads.
//!
//! `WebhookPayload` mirrors the JSON body the gateway posts. Only the fields
//! needed for processing are captured; everything else is ignored.
//! `InvoiceEvent` is the validated form, produced once the shop identity and
//! the order reference have been checked.

use serde::{Deserialize, Serialize};

use super::order_reference::OrderReference;

/// Raw webhook body (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// Event type, e.g. `InvoicePaid`.
    #[serde(rename = "eventType", default)]
    pub event_type: String,

    /// The invoice the event refers to.
    pub invoice: InvoicePayload,

    /// Access token block; not used by processing.
    #[serde(
        rename = "invoiceAccessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_access_token: Option<serde_json::Value>,
}

/// Invoice object inside a webhook body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoicePayload {
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    pub currency: String,

    #[serde(rename = "shopID")]
    pub shop_id: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub metadata: InvoiceMetadata,
}

/// Metadata attached at invoice creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvoiceMetadata {
    /// Encoded `OrderReference`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl WebhookPayload {
    /// Parses a raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Order reference as sent, with surrounding whitespace removed.
    /// `None` when absent or blank.
    pub fn raw_order_id(&self) -> Option<&str> {
        self.invoice
            .metadata
            .order_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Webhook event types the gateway emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEventType {
    InvoicePaid,
    InvoiceCancelled,
    /// Any other event (`InvoiceCreated`, `PaymentStarted`, ...).
    Other(String),
}

impl InvoiceEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "InvoicePaid" => Self::InvoicePaid,
            "InvoiceCancelled" => Self::InvoiceCancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InvoicePaid => "InvoicePaid",
            Self::InvoiceCancelled => "InvoiceCancelled",
            Self::Other(s) => s,
        }
    }

    /// True for the events that can settle an order.
    pub fn is_settlement(&self) -> bool {
        matches!(self, Self::InvoicePaid | Self::InvoiceCancelled)
    }
}

/// Invoice status as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
    Other(String),
}

impl InvoiceStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "unpaid" | "pending" => Self::Pending,
            "paid" => Self::Paid,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

/// A webhook that passed shop and order-reference checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceEvent {
    pub event_type: InvoiceEventType,
    pub invoice_id: String,
    pub shop_id: String,
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub order_ref: OrderReference,
}

impl InvoiceEvent {
    /// Combines a parsed payload with its decoded order reference.
    pub fn from_payload(payload: WebhookPayload, order_ref: OrderReference) -> Self {
        Self {
            event_type: InvoiceEventType::parse(&payload.event_type),
            invoice_id: payload.invoice.id,
            shop_id: payload.invoice.shop_id,
            amount: payload.invoice.amount,
            currency: payload.invoice.currency,
            status: InvoiceStatus::parse(&payload.invoice.status),
            order_ref,
        }
    }

    /// Display lines attached to recorded transactions.
    pub fn view_data(&self) -> String {
        format!(
            "invoiceId: {}\namount: {}\ncurrency: {}",
            self.invoice_id, self.amount, self.currency
        )
    }
}
