//! RBKmoney invoice API client.
//!
//! Implements `InvoiceApi` over the gateway's REST endpoint
//! `POST {api_base_url}processing/invoices`. Only `201 Created` counts as
//! success; every other status fails the attempt without retrying.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::ports::{CreateInvoiceRequest, CreatedInvoice, InvoiceApi, InvoiceError};

const INVOICES_PATH: &str = "processing/invoices";

/// Header carrying a unique id per API call.
const REQUEST_ID_HEADER: &str = "X-Request-ID";

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    invoice: InvoiceHandle,
    #[serde(rename = "invoiceAccessToken")]
    invoice_access_token: AccessToken,
}

#[derive(Debug, Deserialize)]
struct InvoiceHandle {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    payload: String,
}

/// Invoice API client.
pub struct RbkMoneyApiClient {
    api_base_url: String,
    api_key: SecretString,
    http_client: reqwest::Client,
}

impl RbkMoneyApiClient {
    pub fn new(api_base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn invoices_url(&self) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), INVOICES_PATH)
    }
}

#[async_trait]
impl InvoiceApi for RbkMoneyApiClient {
    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<CreatedInvoice, InvoiceError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| InvoiceError::Validation(format!("Failed to encode invoice: {}", e)))?;
        let request_id = Uuid::new_v4().to_string();

        let response = self
            .http_client
            .post(self.invoices_url())
            .header(REQUEST_ID_HEADER, &request_id)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(request_id = %request_id, error = %e, "Invoice API unreachable");
                InvoiceError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %error_text,
                "Invoice creation failed"
            );
            return Err(InvoiceError::UnexpectedStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let created: InvoiceResponse = response.json().await.map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Invalid invoice API response");
            InvoiceError::InvalidResponse(e.to_string())
        })?;

        tracing::info!(
            request_id = %request_id,
            invoice_id = %created.invoice.id,
            order_id = %request.metadata.order_id,
            "Invoice created"
        );

        Ok(CreatedInvoice {
            invoice_id: created.invoice.id,
            access_token: created.invoice_access_token.payload,
        })
    }
}
