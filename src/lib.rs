//! RBKmoney Checkout - Payment gateway integration for hosted checkout
//!
//! This crate creates gateway invoices for shop orders, renders the hosted
//! checkout form, and turns signed invoice webhooks into transaction results
//! for the host application.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
