//! Invoice request builder.
//!
//! Turns a host order into the body of `POST processing/invoices`. Amounts
//! are converted to minor units with exact decimal arithmetic.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::payment::{vat_rate_label, CheckoutOrder, OrderReference};
use crate::ports::{CartLine, CreateInvoiceRequest, InvoiceError, InvoiceRequestMetadata, TaxMode};

/// Invoices stay payable for one day.
const INVOICE_TTL_DAYS: i64 = 1;

const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Longest product description the gateway accepts.
const MAX_PRODUCT_CHARS: usize = 255;

const MODULE_NAME: &str = "rbkmoney";

/// Builds invoice-creation requests for one shop and merchant instance.
#[derive(Debug, Clone)]
pub struct InvoiceRequestBuilder {
    shop_id: String,
    tenant_id: String,
    merchant_id: String,
}

impl InvoiceRequestBuilder {
    pub fn new(
        shop_id: impl Into<String>,
        tenant_id: impl Into<String>,
        merchant_id: impl Into<String>,
    ) -> Self {
        Self {
            shop_id: shop_id.into(),
            tenant_id: tenant_id.into(),
            merchant_id: merchant_id.into(),
        }
    }

    /// Builds the request body for `order`, due one day after `now`.
    pub fn build(
        &self,
        order: &CheckoutOrder,
        now: DateTime<Utc>,
    ) -> Result<CreateInvoiceRequest, InvoiceError> {
        let amount = to_minor_units(order.amount)?;
        if amount <= 0 {
            return Err(InvoiceError::Validation("Amount must be set".to_string()));
        }

        let order_id = OrderReference::encode(&self.tenant_id, &self.merchant_id, &order.id)
            .map_err(|e| InvoiceError::Validation(e.to_string()))?;

        Ok(CreateInvoiceRequest {
            shop_id: self.shop_id.clone(),
            amount,
            metadata: InvoiceRequestMetadata {
                cms: env!("CARGO_PKG_NAME").to_string(),
                cms_version: env!("CARGO_PKG_VERSION").to_string(),
                module: MODULE_NAME.to_string(),
                order_id,
            },
            due_date: due_date(now),
            currency: order.currency.clone(),
            product: product_description(&order.description),
            cart: cart_lines(order)?,
            description: String::new(),
        })
    }
}

/// `now` plus one day, formatted for the gateway.
pub fn due_date(now: DateTime<Utc>) -> String {
    (now + Duration::days(INVOICE_TTL_DAYS))
        .format(DUE_DATE_FORMAT)
        .to_string()
}

/// Truncates to 255 characters and replaces `#`, which the gateway rejects.
pub fn product_description(description: &str) -> String {
    description
        .chars()
        .take(MAX_PRODUCT_CHARS)
        .map(|c| if c == '#' { '№' } else { c })
        .collect()
}

/// Major units to minor units with banker's rounding.
fn to_minor_units(amount: Decimal) -> Result<i64, InvoiceError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round())
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| InvoiceError::Validation(format!("Amount out of range: {amount}")))
}

fn cart_lines(order: &CheckoutOrder) -> Result<Vec<CartLine>, InvoiceError> {
    let mut lines = Vec::with_capacity(order.items.len() + 1);

    if let Some(shipping) = order.shipping.as_ref().filter(|s| s.is_billable()) {
        lines.push(CartLine {
            product: shipping.name.clone(),
            quantity: 1,
            price: to_minor_units(shipping.price)?,
            tax_mode: tax_mode(shipping.tax_rate, &shipping.name),
        });
    }

    for item in &order.items {
        lines.push(CartLine {
            product: item.name.clone(),
            quantity: item.quantity,
            price: to_minor_units(item.net_price())?,
            tax_mode: tax_mode(item.tax_rate, &item.name),
        });
    }

    Ok(lines)
}

fn tax_mode(rate: Option<Decimal>, product: &str) -> Option<TaxMode> {
    let rate = rate?;
    match vat_rate_label(rate) {
        Some(label) => Some(TaxMode::vat(label)),
        None => {
            tracing::warn!(%rate, product, "Unknown tax rate, sending line without tax mode");
            None
        }
    }
}
