//! Invoice API port for outbound invoice creation.
//!
//! Defines the request body sent to the gateway's invoice endpoint and the
//! handle returned for the hosted checkout form.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for creating gateway invoices.
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// Creates an invoice. Anything but `201 Created` is a failure.
    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<CreatedInvoice, InvoiceError>;
}

/// Body of `POST processing/invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(rename = "shopID")]
    pub shop_id: String,

    /// Total in minor units.
    pub amount: i64,

    pub metadata: InvoiceRequestMetadata,

    /// UTC, `%Y-%m-%dT%H:%M:%SZ`.
    #[serde(rename = "dueDate")]
    pub due_date: String,

    pub currency: String,

    pub product: String,

    pub cart: Vec<CartLine>,

    pub description: String,
}

/// Metadata echoed back in every webhook for this invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequestMetadata {
    pub cms: String,
    pub cms_version: String,
    pub module: String,
    /// Encoded order reference.
    pub order_id: String,
}

/// One invoice cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: String,
    pub quantity: u32,
    /// Unit price in minor units.
    pub price: i64,
    #[serde(rename = "taxMode", default, skip_serializing_if = "Option::is_none")]
    pub tax_mode: Option<TaxMode>,
}

/// VAT mode of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxMode {
    #[serde(rename = "type")]
    pub kind: String,
    pub rate: String,
}

impl TaxMode {
    pub fn vat(rate: &str) -> Self {
        Self {
            kind: "InvoiceLineTaxVAT".to_string(),
            rate: rate.to_string(),
        }
    }
}

/// Handle of a created invoice, needed to open the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub invoice_id: String,
    pub access_token: String,
}

/// Errors raised while creating an invoice or rendering its checkout form.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The order cannot be turned into an invoice.
    #[error("Invalid order: {0}")]
    Validation(String),

    /// The gateway could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway answered with something other than `201 Created`.
    #[error("Unexpected status {status} from invoice API")]
    UnexpectedStatus { status: u16, body: String },

    /// The `201` body lacks the invoice id or access token.
    #[error("Invalid invoice API response: {0}")]
    InvalidResponse(String),

    /// The checkout form failed to render.
    #[error("Template error: {0}")]
    Template(String),
}

impl InvoiceError {
    /// Message safe to show to the paying customer.
    pub fn public_message(&self) -> &'static str {
        match self {
            InvoiceError::Validation(_) => "The order cannot be paid",
            _ => "Payment is temporarily unavailable, please try again later",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_api_is_object_safe() {
        fn _accepts_dyn(_api: &dyn InvoiceApi) {}
    }

    #[test]
    fn request_serializes_gateway_field_names() {
        let request = CreateInvoiceRequest {
            shop_id: "TEST".to_string(),
            amount: 1500,
            metadata: InvoiceRequestMetadata {
                cms: "rbkmoney-checkout".to_string(),
                cms_version: "0.1.0".to_string(),
                module: "rbkmoney".to_string(),
                order_id: "app1_m1_ord9".to_string(),
            },
            due_date: "2026-01-02T00:00:00Z".to_string(),
            currency: "USD".to_string(),
            product: "Order 9".to_string(),
            cart: vec![CartLine {
                product: "Tea".to_string(),
                quantity: 1,
                price: 1500,
                tax_mode: Some(TaxMode::vat("18%")),
            }],
            description: String::new(),
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["shopID"], "TEST");
        assert_eq!(json["dueDate"], "2026-01-02T00:00:00Z");
        assert_eq!(json["metadata"]["order_id"], "app1_m1_ord9");
        assert_eq!(json["cart"][0]["taxMode"]["type"], "InvoiceLineTaxVAT");
        assert_eq!(json["cart"][0]["taxMode"]["rate"], "18%");
    }

    #[test]
    fn cart_line_without_tax_omits_tax_mode() {
        let line = CartLine {
            product: "Delivery".to_string(),
            quantity: 1,
            price: 300,
            tax_mode: None,
        };

        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("taxMode").is_none());
    }

    #[test]
    fn upstream_errors_hide_details_from_customer() {
        let err = InvoiceError::UnexpectedStatus {
            status: 401,
            body: "bad token".to_string(),
        };

        assert_eq!(err.to_string(), "Unexpected status 401 from invoice API");
        assert!(!err.public_message().contains("401"));
    }
}
