//! Domain logic for the table, a peer-to-peer local-class marketplace.
//!
//! This crate is I/O-free: shared id/timestamp types, the [`error::CoreError`]
//! taxonomy, and per-feature modules holding constants, validation functions,
//! and the credit-ledger arithmetic. The `db` and `api` crates depend on it;
//! it depends on nothing but `chrono`, `serde`, and `thiserror`.

pub mod application;
pub mod booking;
pub mod classes;
pub mod error;
pub mod ledger;
pub mod roles;
pub mod types;
