//! In-process host collaborators for the standalone service.

mod tracing_callback;
mod transaction_log;

pub use tracing_callback::TracingAppCallback;
pub use transaction_log::InMemoryTransactionLog;
