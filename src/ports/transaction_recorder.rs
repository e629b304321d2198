//! Transaction recorder port.
//!
//! The host application owns transaction storage. Each processed webhook is
//! handed over exactly once per delivery; the recorder may dedupe on
//! `native_id` and `state` since redeliveries produce identical results.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment::TransactionResult;

/// Failure reported by a host-side collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port for persisting transaction results.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    /// Stores the transaction and returns the stored form.
    ///
    /// The returned value is what the application callback receives.
    async fn record(&self, result: TransactionResult)
        -> Result<TransactionResult, CollaboratorError>;
}
