//! Order reference codec.
//!
//! An order reference links a gateway invoice back to the tenant (host
//! application), the merchant instance that created it, and the order itself.
//! It travels inside invoice metadata as a single string:
//!
//! ```text
//! {tenant_id}_{merchant_id}_{order_id}
//! ```
//!
//! Tenant and merchant segments are ASCII alphanumeric and at least two
//! characters long, so the first two underscores are always separators. The
//! order segment takes everything after the second separator, further
//! underscores included.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([A-Za-z0-9]{2,})_([A-Za-z0-9]{2,})_(.+)$").expect("valid reference pattern")
});

static SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{2,}$").expect("valid segment pattern"));

/// Errors raised while building or decoding an order reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderReferenceError {
    /// The encoded string does not have the `tenant_merchant_order` shape.
    #[error("Invalid order reference: {0}")]
    InvalidReference(String),

    /// A tenant or merchant segment is not alphanumeric with length >= 2.
    #[error("Invalid {segment} segment: {value:?}")]
    InvalidSegment {
        segment: &'static str,
        value: String,
    },

    /// The order segment is empty.
    #[error("Order id must not be empty")]
    EmptyOrderId,
}

/// Composite identifier embedded in invoice metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderReference {
    tenant_id: String,
    merchant_id: String,
    order_id: String,
}

impl OrderReference {
    /// Builds a reference, validating every segment.
    pub fn new(
        tenant_id: impl Into<String>,
        merchant_id: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Result<Self, OrderReferenceError> {
        let tenant_id = tenant_id.into();
        let merchant_id = merchant_id.into();
        let order_id = order_id.into();

        validate_segment("tenant", &tenant_id)?;
        validate_segment("merchant", &merchant_id)?;
        if order_id.is_empty() {
            return Err(OrderReferenceError::EmptyOrderId);
        }

        Ok(Self {
            tenant_id,
            merchant_id,
            order_id,
        })
    }

    /// Encodes a triple directly into its wire form.
    pub fn encode(
        tenant_id: &str,
        merchant_id: &str,
        order_id: &str,
    ) -> Result<String, OrderReferenceError> {
        Self::new(tenant_id, merchant_id, order_id).map(|reference| reference.to_string())
    }

    /// Decodes the wire form. Fails instead of truncating.
    pub fn decode(encoded: &str) -> Result<Self, OrderReferenceError> {
        let captures = REFERENCE_PATTERN
            .captures(encoded)
            .ok_or_else(|| OrderReferenceError::InvalidReference(encoded.to_string()))?;

        Ok(Self {
            tenant_id: captures[1].to_string(),
            merchant_id: captures[2].to_string(),
            order_id: captures[3].to_string(),
        })
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }
}

/// Checks a tenant or merchant segment against the reference pattern.
pub fn validate_segment(segment: &'static str, value: &str) -> Result<(), OrderReferenceError> {
    if SEGMENT_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(OrderReferenceError::InvalidSegment {
            segment,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.tenant_id, self.merchant_id, self.order_id)
    }
}

impl FromStr for OrderReference {
    type Err = OrderReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
