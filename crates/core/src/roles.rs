//! Well-known role name constants.
//!
//! These must match the seed data in `20260410000001_create_roles_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
