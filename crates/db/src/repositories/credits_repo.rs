//! Repository for the `credits` table.

use sqlx::PgExecutor;
use thetable_core::types::DbId;

use crate::models::credits::Credits;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, topped_up_balance, teaching_balance, updated_at";

/// Provides balance operations for credits.
///
/// Balance mutations only happen inside transactions (signup, top-up,
/// booking), so all methods accept any executor. Callers are expected to
/// lock the row with [`CreditsRepo::find_by_user_for_update`] before
/// applying a debit plan computed from it.
pub struct CreditsRepo;

impl CreditsRepo {
    /// Insert a zero-balance credits row for a user (signup transaction).
    pub async fn create(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Credits, sqlx::Error> {
        let query = format!(
            "INSERT INTO credits (user_id)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credits>(&query)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    /// Find the credits row belonging to a user.
    pub async fn find_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Credits>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credits WHERE user_id = $1");
        sqlx::query_as::<_, Credits>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user's credits row and lock it for the rest of the
    /// surrounding transaction.
    pub async fn find_by_user_for_update(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Credits>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM credits WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Credits>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Rewrite both buckets with the post-debit balances from a
    /// `thetable_core::ledger::DebitPlan`.
    pub async fn apply_debit(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        new_topped_up_balance: i32,
        new_teaching_balance: i32,
    ) -> Result<Credits, sqlx::Error> {
        let query = format!(
            "UPDATE credits SET
                topped_up_balance = $2,
                teaching_balance = $3,
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credits>(&query)
            .bind(user_id)
            .bind(new_topped_up_balance)
            .bind(new_teaching_balance)
            .fetch_one(executor)
            .await
    }

    /// Add purchased credits to the topped-up bucket (top-up transaction).
    pub async fn add_topped_up(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        amount: i32,
    ) -> Result<Credits, sqlx::Error> {
        let query = format!(
            "UPDATE credits SET
                topped_up_balance = topped_up_balance + $2,
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Credits>(&query)
            .bind(user_id)
            .bind(amount)
            .fetch_one(executor)
            .await
    }
}
