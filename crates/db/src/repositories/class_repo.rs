//! Repository for the `classes` table.

use sqlx::PgExecutor;
use thetable_core::types::DbId;

use crate::models::class::{Class, ClassWithMeta, CreateClass};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, host_id, title, description, category, city, country, address, \
                        class_date, start_time, duration_hours, cost_credits, max_participants, \
                        thumbnail_url, who_for, prerequisites, walk_away_with, what_to_bring, \
                        created_at";

/// Provides catalog operations for classes.
///
/// `find_by_id_for_update` runs inside the booking transaction, so all
/// methods accept any executor.
pub struct ClassRepo;

impl ClassRepo {
    /// Insert a new class, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateClass,
    ) -> Result<Class, sqlx::Error> {
        let query = format!(
            "INSERT INTO classes (host_id, title, description, category, city, country, address,
                                  class_date, start_time, duration_hours, cost_credits,
                                  max_participants, who_for, prerequisites, walk_away_with,
                                  what_to_bring)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(input.host_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.address)
            .bind(input.class_date)
            .bind(input.start_time)
            .bind(input.duration_hours)
            .bind(input.cost_credits)
            .bind(input.max_participants)
            .bind(&input.who_for)
            .bind(&input.prerequisites)
            .bind(&input.walk_away_with)
            .bind(&input.what_to_bring)
            .fetch_one(executor)
            .await
    }

    /// Find a class by internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes WHERE id = $1");
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a class and lock its row for the rest of the surrounding
    /// transaction. Serializes rival bookings for the same class.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List upcoming classes with host name and booking count, soonest
    /// first. Optionally filtered to a single category.
    pub async fn list_upcoming(
        executor: impl PgExecutor<'_>,
        category: Option<&str>,
    ) -> Result<Vec<ClassWithMeta>, sqlx::Error> {
        let query = "SELECT c.id, c.host_id, c.title, c.description, c.category, c.city,
                            c.country, c.class_date, c.start_time, c.duration_hours,
                            c.cost_credits, c.max_participants, c.thumbnail_url,
                            p.full_name AS host_name,
                            (SELECT COUNT(*) FROM bookings b WHERE b.class_id = c.id) AS booked_count
                     FROM classes c
                     JOIN profiles p ON p.user_id = c.host_id
                     WHERE c.class_date >= CURRENT_DATE
                       AND ($1::text IS NULL OR c.category = $1)
                     ORDER BY c.class_date ASC, c.start_time ASC";
        sqlx::query_as::<_, ClassWithMeta>(query)
            .bind(category)
            .fetch_all(executor)
            .await
    }

    /// List all classes run by a host, soonest first.
    pub async fn list_by_host(
        executor: impl PgExecutor<'_>,
        host_id: DbId,
    ) -> Result<Vec<Class>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM classes
             WHERE host_id = $1
             ORDER BY class_date ASC, start_time ASC"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(host_id)
            .fetch_all(executor)
            .await
    }

    /// Set the thumbnail URL after a photo upload.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_thumbnail(
        executor: impl PgExecutor<'_>,
        id: DbId,
        thumbnail_url: &str,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!(
            "UPDATE classes SET thumbnail_url = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .bind(thumbnail_url)
            .fetch_optional(executor)
            .await
    }
}
