//! Route definitions for the `/host-applications` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::host_application;
use crate::state::AppState;

/// Routes mounted at `/host-applications`.
///
/// ```text
/// POST /  -> submit an application (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(host_application::submit))
}
