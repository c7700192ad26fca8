pub mod admin;
pub mod auth;
pub mod class;
pub mod health;
pub mod host_application;
pub mod me;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                             register (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
///
/// /me                                      account + profile + balances
/// /me/profile                              partial profile update (PUT)
/// /me/bookings                             my bookings with class facts
/// /me/classes                              classes I host
/// /me/transactions                         my credit ledger
/// /me/host-application                     my latest host application
/// /me/credits/top-up                       buy credits (POST, simulated)
///
/// /classes                                 catalog (GET), list a class (POST, verified hosts)
/// /classes/{id}                            detail (viewer-dependent reveal)
/// /classes/{id}/photo                      upload photo (POST, host, multipart)
/// /classes/{id}/bookings                   book a seat (POST)
///
/// /host-applications                       submit application (POST)
///
/// /admin/host-applications                 review queue (admin only)
/// /admin/host-applications/{id}/approve    approve + host-verify (POST)
/// /admin/host-applications/{id}/reject     reject with feedback (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // The caller's own account, balances, and history.
        .nest("/me", me::router())
        // Class catalog, creation, photos, and bookings.
        .nest("/classes", class::router())
        // Host application submission.
        .nest("/host-applications", host_application::router())
        // Admin review of host applications.
        .nest("/admin", admin::router())
}
