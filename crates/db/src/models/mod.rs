//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs where the entity is written through the API
//! - Joined row structs for queries that pull in related columns

pub mod booking;
pub mod class;
pub mod credit_transaction;
pub mod credits;
pub mod host_application;
pub mod profile;
pub mod role;
pub mod session;
pub mod user;
