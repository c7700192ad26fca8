//! Request handlers for the marketplace API.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `thetable_db`, run domain
//! validation from `thetable_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod admin;
pub mod auth;
pub mod booking;
pub mod class;
pub mod host_application;
pub mod me;
