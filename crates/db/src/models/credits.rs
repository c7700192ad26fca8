//! Credit balance model.

use serde::Serialize;
use sqlx::FromRow;
use thetable_core::types::{DbId, Timestamp};

/// A credit balance row from the `credits` table. One per user, created
/// at signup with both buckets at zero.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Credits {
    pub id: DbId,
    pub user_id: DbId,
    /// Purchased credits.
    pub topped_up_balance: i32,
    /// Credits earned by teaching. Debited first; no in-app operation
    /// currently credits this bucket.
    pub teaching_balance: i32,
    pub updated_at: Timestamp,
}
