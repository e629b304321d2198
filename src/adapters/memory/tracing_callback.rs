//! Application callback that only logs.
//!
//! Used by the standalone binary, where no host application is attached.

use async_trait::async_trait;

use crate::domain::payment::{CallbackKind, TransactionResult};
use crate::ports::{AppCallback, CollaboratorError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAppCallback;

#[async_trait]
impl AppCallback for TracingAppCallback {
    async fn execute(
        &self,
        kind: CallbackKind,
        transaction: TransactionResult,
    ) -> Result<(), CollaboratorError> {
        tracing::info!(
            callback = kind.as_str(),
            invoice_id = %transaction.native_id,
            tenant_id = transaction.order_ref.tenant_id(),
            merchant_id = transaction.order_ref.merchant_id(),
            order_id = transaction.order_ref.order_id(),
            amount = %transaction.amount,
            currency = %transaction.currency_id,
            "Application callback"
        );
        Ok(())
    }
}
