//! Repository for the `profiles` table.

use sqlx::PgExecutor;
use thetable_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, full_name, city, country, bio, avatar_url, \
                        host_verified, created_at, updated_at";

/// Provides CRUD operations for profiles.
///
/// `create` runs inside the signup transaction and `set_host_verified`
/// inside the approval transaction, so methods accept any executor.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, full_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.user_id)
            .bind(&input.full_name)
            .fetch_one(executor)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Update a user's profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                city = COALESCE($3, city),
                country = COALESCE($4, country),
                bio = COALESCE($5, bio),
                avatar_url = COALESCE($6, avatar_url),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.bio)
            .bind(&input.avatar_url)
            .fetch_optional(executor)
            .await
    }

    /// Set the host verification flag. Returns `true` if the row was updated.
    pub async fn set_host_verified(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        verified: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET host_verified = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(verified)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
