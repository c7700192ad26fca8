//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin role.
///
/// ```text
/// GET  /host-applications               -> review queue
/// POST /host-applications/{id}/approve  -> approve + host-verify profile
/// POST /host-applications/{id}/reject   -> reject with feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/host-applications", get(admin::list_applications))
        .route(
            "/host-applications/{id}/approve",
            post(admin::approve_application),
        )
        .route(
            "/host-applications/{id}/reject",
            post(admin::reject_application),
        )
}
