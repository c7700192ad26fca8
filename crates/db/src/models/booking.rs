//! Booking model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use thetable_core::types::{DbId, Timestamp};

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub class_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub booked_at: Timestamp,
}

/// DTO for creating a booking.
#[derive(Debug)]
pub struct CreateBooking {
    pub class_id: DbId,
    pub user_id: DbId,
}

/// A booking joined with the class facts needed to render "my bookings".
/// The address is included: a booked user is always entitled to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithClass {
    pub id: DbId,
    pub class_id: DbId,
    pub status: String,
    pub booked_at: Timestamp,
    pub title: String,
    pub category: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub cost_credits: i32,
    pub thumbnail_url: Option<String>,
}

/// One attendee of a class, as shown to the host and booked participants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendee {
    pub user_id: DbId,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub booked_at: Timestamp,
}
