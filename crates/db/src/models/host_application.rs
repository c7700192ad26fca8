//! Host application model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use thetable_core::application::{Experience, ProofLink};
use thetable_core::types::{DbId, Timestamp};

/// A host application row from the `host_applications` table.
///
/// `experiences` and `proof_links` are JSONB columns decoded into the
/// typed records from `thetable_core::application`, so a malformed row
/// fails the query instead of leaking into responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: String,
    pub teach_ideas: String,
    pub experiences: Json<Vec<Experience>>,
    pub proof_links: Json<Vec<ProofLink>>,
    pub status: String,
    pub submitted_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    pub rejection_feedback: Option<String>,
}

/// DTO for submitting a host application.
#[derive(Debug)]
pub struct CreateHostApplication {
    pub user_id: DbId,
    pub bio: String,
    pub teach_ideas: String,
    pub experiences: Json<Vec<Experience>>,
    pub proof_links: Json<Vec<ProofLink>>,
}

/// An application joined with applicant identity for the admin queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostApplicationWithApplicant {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: String,
    pub teach_ideas: String,
    pub experiences: Json<Vec<Experience>>,
    pub proof_links: Json<Vec<ProofLink>>,
    pub status: String,
    pub submitted_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    pub rejection_feedback: Option<String>,
    pub applicant_name: String,
    pub applicant_email: String,
}
