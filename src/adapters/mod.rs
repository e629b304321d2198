//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `rbkmoney` - Gateway API client, checkout form, webhook gateway
//! - `memory` - In-process transaction log and callback
//! - `http` - Axum routes

pub mod http;
pub mod memory;
pub mod rbkmoney;

pub use memory::{InMemoryTransactionLog, TracingAppCallback};
pub use rbkmoney::{RbkMoneyApiClient, RbkMoneyGateway};
