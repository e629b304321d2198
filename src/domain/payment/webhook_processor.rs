//! Webhook processor - Turns gateway notifications into host transactions.
//!
//! ## Pipeline
//!
//! Each delivery moves through:
//! 1. Signature header present
//! 2. Signature verified against the configured key
//! 3. Body parsed
//! 4. Shop id and order reference checked
//! 5. Event mapped to a transaction state (or ignored)
//! 6. Transaction recorded, then the application callback invoked
//!
//! Any step may reject the delivery with a `WebhookError`. The processor
//! holds no state between deliveries; redeliveries map to identical
//! `TransactionResult`s and deduplication is left to the recorder.

use std::sync::Arc;

use super::errors::WebhookError;
use super::invoice_event::{InvoiceEvent, InvoiceStatus, WebhookPayload};
use super::order_reference::OrderReference;
use super::signature::{ContentSignature, SignatureVerifier};
use super::transaction::{CallbackKind, TransactionResult, TransactionState};
use crate::ports::{AppCallback, TransactionRecorder};

/// Name of the header carrying the webhook signature.
pub const CONTENT_SIGNATURE_HEADER: &str = "content-signature";

/// One webhook delivery as received.
#[derive(Debug, Clone, Copy)]
pub struct WebhookEnvelope<'a> {
    /// Raw request body, exactly as signed.
    pub body: &'a [u8],
    /// `Content-Signature` header value, if sent.
    pub content_signature: Option<&'a str>,
}

impl<'a> WebhookEnvelope<'a> {
    pub fn new(body: &'a [u8], content_signature: Option<&'a str>) -> Self {
        Self {
            body,
            content_signature,
        }
    }
}

/// Shop identity and key used to authenticate deliveries.
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub shop_id: String,
    pub verifier: SignatureVerifier,
}

/// Why a valid delivery was acknowledged without dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnsupportedEventType(String),
    UnmappedStatus(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::UnsupportedEventType(t) => write!(f, "unsupported event type {t:?}"),
            IgnoreReason::UnmappedStatus(s) => write!(f, "unmapped invoice status {s:?}"),
        }
    }
}

/// Result of a successfully processed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Recorded and handed to the application.
    Dispatched {
        transaction: TransactionResult,
        callback: CallbackKind,
    },
    /// Acknowledged, nothing dispatched.
    Ignored { reason: IgnoreReason },
}

/// What a validated event turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventMapping {
    Settle {
        state: TransactionState,
        callback: CallbackKind,
    },
    Ignore(IgnoreReason),
}

/// Maps a validated event to a transaction state.
///
/// A non-positive amount is a data fault even for events that would
/// otherwise be ignored.
pub fn map_event(event: &InvoiceEvent) -> Result<EventMapping, WebhookError> {
    if event.amount <= 0 {
        return Err(WebhookError::AmountMissing);
    }

    if !event.event_type.is_settlement() {
        return Ok(EventMapping::Ignore(IgnoreReason::UnsupportedEventType(
            event.event_type.as_str().to_string(),
        )));
    }

    let mapping = match event.status {
        InvoiceStatus::Cancelled => EventMapping::Settle {
            state: TransactionState::Canceled,
            callback: CallbackKind::Cancel,
        },
        InvoiceStatus::Paid => EventMapping::Settle {
            state: TransactionState::Captured,
            callback: CallbackKind::Payment,
        },
        ref status => {
            EventMapping::Ignore(IgnoreReason::UnmappedStatus(status.as_str().to_string()))
        }
    };

    Ok(mapping)
}

/// Processes webhook deliveries for one shop.
pub struct WebhookProcessor {
    settings: WebhookSettings,
    recorder: Arc<dyn TransactionRecorder>,
    callback: Arc<dyn AppCallback>,
}

impl WebhookProcessor {
    pub fn new(
        settings: WebhookSettings,
        recorder: Arc<dyn TransactionRecorder>,
        callback: Arc<dyn AppCallback>,
    ) -> Self {
        Self {
            settings,
            recorder,
            callback,
        }
    }

    /// Processes one delivery end to end.
    ///
    /// # Returns
    ///
    /// - `Ok(WebhookOutcome::Dispatched)` - Recorded and passed to the application
    /// - `Ok(WebhookOutcome::Ignored)` - Valid but not actionable
    /// - `Err(_)` - Rejected; see `WebhookError::status_code`
    pub async fn process(
        &self,
        envelope: WebhookEnvelope<'_>,
    ) -> Result<WebhookOutcome, WebhookError> {
        self.verify_signature(&envelope)?;
        let event = self.parse_event(envelope.body)?;

        let (state, callback) = match map_event(&event) {
            Ok(EventMapping::Settle { state, callback }) => (state, callback),
            Ok(EventMapping::Ignore(reason)) => {
                tracing::info!(
                    invoice_id = %event.invoice_id,
                    event_type = event.event_type.as_str(),
                    reason = %reason,
                    "Webhook ignored"
                );
                return Ok(WebhookOutcome::Ignored { reason });
            }
            Err(err) => {
                tracing::warn!(
                    invoice_id = %event.invoice_id,
                    amount = event.amount,
                    "Webhook rejected: amount is missing"
                );
                return Err(err);
            }
        };

        let result = TransactionResult::from_event(&event, state);
        let recorded = self.recorder.record(result).await.map_err(|e| {
            tracing::error!(
                invoice_id = %event.invoice_id,
                error = %e,
                "Failed to record transaction"
            );
            WebhookError::Recording(e.to_string())
        })?;

        self.callback
            .execute(callback, recorded.clone())
            .await
            .map_err(|e| {
                tracing::error!(
                    invoice_id = %event.invoice_id,
                    callback = callback.as_str(),
                    error = %e,
                    "Application callback failed"
                );
                WebhookError::Callback(e.to_string())
            })?;

        tracing::info!(
            invoice_id = %recorded.native_id,
            order_id = recorded.order_ref.order_id(),
            state = ?recorded.state,
            callback = callback.as_str(),
            "Webhook dispatched"
        );

        Ok(WebhookOutcome::Dispatched {
            transaction: recorded,
            callback,
        })
    }

    fn verify_signature(&self, envelope: &WebhookEnvelope<'_>) -> Result<(), WebhookError> {
        let header = envelope
            .content_signature
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Webhook rejected: signature header missing");
                WebhookError::SignatureMissing
            })?;

        let signature = ContentSignature::parse(header).map_err(|e| {
            tracing::warn!(parameter = e.parameter(), "Webhook rejected: malformed signature header");
            WebhookError::MissingSignatureParameter(e.parameter())
        })?;

        if !self.settings.verifier.verify_signature(envelope.body, &signature) {
            tracing::warn!(
                header_alg = %signature.alg,
                body_len = envelope.body.len(),
                "Webhook rejected: signature mismatch"
            );
            return Err(WebhookError::SignatureMismatch);
        }

        Ok(())
    }

    fn parse_event(&self, body: &[u8]) -> Result<InvoiceEvent, WebhookError> {
        let payload = WebhookPayload::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "Webhook rejected: malformed payload");
            WebhookError::MalformedPayload(e.to_string())
        })?;

        if payload.invoice.shop_id != self.settings.shop_id {
            tracing::warn!(
                invoice_id = %payload.invoice.id,
                shop_id = %payload.invoice.shop_id,
                "Webhook rejected: shop id mismatch"
            );
            return Err(WebhookError::ShopIdMismatch);
        }

        let raw_order_id = payload.raw_order_id().ok_or_else(|| {
            tracing::warn!(
                invoice_id = %payload.invoice.id,
                "Webhook rejected: order id missing"
            );
            WebhookError::OrderIdMissing
        })?;

        let order_ref = OrderReference::decode(raw_order_id).map_err(|e| {
            tracing::warn!(
                invoice_id = %payload.invoice.id,
                order_id = raw_order_id,
                "Webhook rejected: undecodable order reference"
            );
            WebhookError::from(e)
        })?;

        Ok(InvoiceEvent::from_payload(payload, order_ref))
    }
}
