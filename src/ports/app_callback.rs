//! Application callback port.
//!
//! After a transaction is recorded the host application is notified through
//! the callback matching the transaction state: `payment` for captured
//! invoices, `cancel` for cancelled ones.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::payment::{CallbackKind, TransactionResult};

/// Port for notifying the host application of settled orders.
#[async_trait]
pub trait AppCallback: Send + Sync {
    async fn execute(
        &self,
        kind: CallbackKind,
        transaction: TransactionResult,
    ) -> Result<(), CollaboratorError>;
}
