//! Route definitions for the `/classes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{booking, class};
use crate::state::AppState;

/// Routes mounted at `/classes`.
///
/// ```text
/// GET  /               -> catalog of upcoming classes (?category=)
/// POST /               -> list a class (verified hosts)
/// GET  /{id}           -> class detail (viewer-dependent reveal)
/// POST /{id}/photo     -> upload class photo (host, multipart)
/// POST /{id}/bookings  -> book a seat (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(class::list).post(class::create))
        .route("/{id}", get(class::get_by_id))
        .route("/{id}/photo", post(class::upload_photo))
        .route("/{id}/bookings", post(booking::create))
}
