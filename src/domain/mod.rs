//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Order references, webhook verification and transaction mapping

pub mod payment;
