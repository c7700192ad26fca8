//! Route definitions for the `/me` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require authentication.
///
/// ```text
/// GET  /                  -> account + profile + balances
/// PUT  /profile           -> partial profile update
/// GET  /bookings          -> my bookings with class facts
/// GET  /classes           -> classes I host
/// GET  /transactions      -> my credit ledger
/// GET  /host-application  -> my latest host application
/// POST /credits/top-up    -> buy credits (simulated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_me))
        .route("/profile", put(me::update_profile))
        .route("/bookings", get(me::list_bookings))
        .route("/classes", get(me::list_classes))
        .route("/transactions", get(me::list_transactions))
        .route("/host-application", get(me::get_host_application))
        .route("/credits/top-up", post(me::top_up))
}
