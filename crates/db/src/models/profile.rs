//! Marketplace profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thetable_core::types::{DbId, Timestamp};

/// A profile row from the `profiles` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub host_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile (inside the signup transaction).
#[derive(Debug)]
pub struct CreateProfile {
    pub user_id: DbId,
    pub full_name: String,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}
