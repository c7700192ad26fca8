//! Class model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use thetable_core::types::{DbId, Timestamp};

/// A class row from the `classes` table.
///
/// `address` is only revealed to the host and booked participants; use
/// the api layer's detail view rather than serializing this directly to
/// anonymous viewers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Class {
    pub id: DbId,
    pub host_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub cost_credits: i32,
    pub max_participants: i32,
    pub thumbnail_url: Option<String>,
    pub who_for: Option<String>,
    pub prerequisites: Option<String>,
    pub walk_away_with: Option<String>,
    pub what_to_bring: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a class. city/country are resolved from the host's
/// profile by the handler, not accepted from the client.
#[derive(Debug)]
pub struct CreateClass {
    pub host_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub cost_credits: i32,
    pub max_participants: i32,
    pub who_for: Option<String>,
    pub prerequisites: Option<String>,
    pub walk_away_with: Option<String>,
    pub what_to_bring: Option<String>,
}

/// A class joined with its host's display name and current booking count,
/// as returned by the catalog listing query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassWithMeta {
    pub id: DbId,
    pub host_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub country: String,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: i32,
    pub cost_credits: i32,
    pub max_participants: i32,
    pub thumbnail_url: Option<String>,
    pub host_name: String,
    pub booked_count: i64,
}
