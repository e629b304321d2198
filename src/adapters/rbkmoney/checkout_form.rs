//! Hosted checkout form rendering.
//!
//! The form embeds the gateway's checkout script and passes branding plus
//! the invoice credentials as `data-*` attributes. All values go through
//! Tera's HTML autoescaping.

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::PayformConfig;
use crate::ports::{CreatedInvoice, InvoiceError};

const TEMPLATE_NAME: &str = "payment.html";

#[derive(Debug, Serialize)]
struct DataAttribute<'a> {
    name: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckoutFormContext<'a> {
    checkout_url: &'a str,
    success_url: &'a str,
    order_id: &'a str,
    attributes: Vec<DataAttribute<'a>>,
}

/// Renders the checkout form for created invoices.
pub struct CheckoutFormRenderer {
    tera: Tera,
    checkout_url: String,
    payform: PayformConfig,
}

impl CheckoutFormRenderer {
    pub fn new(
        checkout_url: impl Into<String>,
        payform: PayformConfig,
    ) -> Result<Self, InvoiceError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, include_str!("../../../templates/payment.html"))
            .map_err(|e| InvoiceError::Template(e.to_string()))?;

        Ok(Self {
            tera,
            checkout_url: checkout_url.into(),
            payform,
        })
    }

    /// Renders the form for `invoice`, submitting to `success_url`.
    pub fn render(
        &self,
        invoice: &CreatedInvoice,
        order_id: &str,
        success_url: &str,
    ) -> Result<String, InvoiceError> {
        let mut attributes: Vec<DataAttribute<'_>> = self
            .payform
            .data_attributes()
            .into_iter()
            .map(|(name, value)| DataAttribute { name, value })
            .collect();
        attributes.push(DataAttribute {
            name: "data-invoice-id",
            value: &invoice.invoice_id,
        });
        attributes.push(DataAttribute {
            name: "data-invoice-access-token",
            value: &invoice.access_token,
        });

        let context = CheckoutFormContext {
            checkout_url: &self.checkout_url,
            success_url,
            order_id,
            attributes,
        };

        let context =
            Context::from_serialize(&context).map_err(|e| InvoiceError::Template(e.to_string()))?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| InvoiceError::Template(e.to_string()))
    }
}
