//! Periodic garbage collection of dead refresh-token sessions.
//!
//! Spawns a background task that deletes `user_sessions` rows that are
//! expired or revoked. Sessions are tombstoned on logout/rotation rather
//! than deleted inline, so this loop is what keeps the table bounded.
//! Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use sqlx::PgPool;
use thetable_db::repositories::SessionRepo;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs by default: 1 hour.
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Run the session cleanup loop.
///
/// Deletes expired and revoked session rows on each tick. The interval
/// can be overridden with `SESSION_CLEANUP_INTERVAL_SECS`. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Session cleanup job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = interval.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Session cleanup: purged dead sessions");
                        } else {
                            tracing::debug!("Session cleanup: no sessions to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session cleanup: purge failed");
                    }
                }
            }
        }
    }
}
