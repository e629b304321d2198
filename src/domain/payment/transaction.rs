//! Canonical transaction results handed to the host application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice_event::InvoiceEvent;
use super::order_reference::OrderReference;

/// Outcome of a settled invoice, from the host application's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Captured,
    Canceled,
    Ignored,
}

/// Application callback names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackKind {
    Payment,
    Cancel,
}

impl CallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackKind::Payment => "payment",
            CallbackKind::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One processed webhook, normalized.
///
/// Identical deliveries produce identical results, so recorders can dedupe on
/// `native_id` and `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Gateway invoice id.
    pub native_id: String,
    /// Amount in major units, two decimal places.
    pub amount: Decimal,
    pub currency_id: String,
    pub state: TransactionState,
    pub order_ref: OrderReference,
    /// Human-readable summary for the host's order view.
    pub view_data: String,
}

impl TransactionResult {
    pub fn from_event(event: &InvoiceEvent, state: TransactionState) -> Self {
        Self {
            native_id: event.invoice_id.clone(),
            amount: minor_to_major(event.amount),
            currency_id: event.currency.clone(),
            state,
            order_ref: event.order_ref.clone(),
            view_data: event.view_data(),
        }
    }
}

/// Converts minor currency units to major units (`1500` → `15.00`).
pub fn minor_to_major(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
