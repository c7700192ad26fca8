//! Repository for the `bookings` table.

use sqlx::PgExecutor;
use thetable_core::types::DbId;

use crate::models::booking::{Attendee, Booking, BookingWithClass, CreateBooking};

const COLUMNS: &str = "id, class_id, user_id, status, booked_at";

/// Persistence for seat reservations.
///
/// `create` runs inside the booking transaction, after the class row has
/// been locked and credits debited.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a confirmed booking, returning the created row.
    ///
    /// The `uq_bookings_class_user` constraint rejects a second booking by
    /// the same user for the same class.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (class_id, user_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.class_id)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Count confirmed seats for a class.
    pub async fn count_for_class(
        executor: impl PgExecutor<'_>,
        class_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE class_id = $1")
                .bind(class_id)
                .fetch_one(executor)
                .await?;
        Ok(count)
    }

    /// Whether the user already holds a seat in the class.
    pub async fn exists_for_user_and_class(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        class_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND class_id = $2)",
        )
        .bind(user_id)
        .bind(class_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// List a user's bookings joined with class facts, newest booking first.
    pub async fn list_for_user_with_class(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<BookingWithClass>, sqlx::Error> {
        let query = "SELECT b.id, b.class_id, b.status, b.booked_at,
                            c.title, c.category, c.city, c.country, c.address,
                            c.class_date, c.start_time, c.duration_hours,
                            c.cost_credits, c.thumbnail_url
                     FROM bookings b
                     JOIN classes c ON c.id = b.class_id
                     WHERE b.user_id = $1
                     ORDER BY b.booked_at DESC, b.id DESC";
        sqlx::query_as::<_, BookingWithClass>(query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// List the attendees of a class with their profile names, in booking
    /// order. Only shown to the host and to booked users.
    pub async fn list_attendees(
        executor: impl PgExecutor<'_>,
        class_id: DbId,
    ) -> Result<Vec<Attendee>, sqlx::Error> {
        let query = "SELECT b.user_id, p.full_name, p.avatar_url, b.booked_at
                     FROM bookings b
                     JOIN profiles p ON p.user_id = b.user_id
                     WHERE b.class_id = $1
                     ORDER BY b.booked_at ASC";
        sqlx::query_as::<_, Attendee>(query)
            .bind(class_id)
            .fetch_all(executor)
            .await
    }
}
