//! In-memory transaction log.
//!
//! Keeps recorded transactions in process memory and deduplicates
//! redeliveries on `(native_id, state)`. Suitable for the standalone binary
//! and tests; embedding hosts plug in their own `TransactionRecorder`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::payment::{TransactionResult, TransactionState};
use crate::ports::{CollaboratorError, TransactionRecorder};

#[derive(Default)]
pub struct InMemoryTransactionLog {
    transactions: RwLock<HashMap<(String, TransactionState), TransactionResult>>,
    order: RwLock<Vec<(String, TransactionState)>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded transactions in arrival order.
    pub async fn transactions(&self) -> Vec<TransactionResult> {
        let transactions = self.transactions.read().await;
        self.order
            .read()
            .await
            .iter()
            .filter_map(|key| transactions.get(key).cloned())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionRecorder for InMemoryTransactionLog {
    async fn record(
        &self,
        result: TransactionResult,
    ) -> Result<TransactionResult, CollaboratorError> {
        let key = (result.native_id.clone(), result.state);
        let mut transactions = self.transactions.write().await;

        if let Some(existing) = transactions.get(&key) {
            tracing::debug!(
                invoice_id = %result.native_id,
                state = ?result.state,
                "Transaction already recorded"
            );
            return Ok(existing.clone());
        }

        transactions.insert(key.clone(), result.clone());
        self.order.write().await.push(key);
        Ok(result)
    }
}
