//! Repository for the `host_applications` table.

use sqlx::PgExecutor;
use thetable_core::application::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use thetable_core::types::DbId;

use crate::models::host_application::{
    CreateHostApplication, HostApplication, HostApplicationWithApplicant,
};

const COLUMNS: &str = "id, user_id, bio, teach_ideas, experiences, proof_links, status, \
                        submitted_at, reviewed_at, rejection_feedback";

/// Persistence for the host application workflow.
///
/// Review transitions are guarded by `AND status = 'pending'` so that a
/// second reviewer racing on the same application gets no row back
/// instead of silently overwriting the first decision.
pub struct HostApplicationRepo;

impl HostApplicationRepo {
    /// Insert a pending application, returning the created row.
    ///
    /// The `uq_host_applications_user_pending` partial index rejects a
    /// second pending application from the same user.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateHostApplication,
    ) -> Result<HostApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO host_applications (user_id, bio, teach_ideas, experiences, proof_links)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostApplication>(&query)
            .bind(input.user_id)
            .bind(&input.bio)
            .bind(&input.teach_ideas)
            .bind(&input.experiences)
            .bind(&input.proof_links)
            .fetch_one(executor)
            .await
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<HostApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM host_applications WHERE id = $1");
        sqlx::query_as::<_, HostApplication>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the user's most recent application, if any.
    pub async fn find_latest_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<HostApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM host_applications
             WHERE user_id = $1
             ORDER BY submitted_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, HostApplication>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Whether the user has an application awaiting review.
    pub async fn has_pending(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM host_applications WHERE user_id = $1 AND status = $2)",
        )
        .bind(user_id)
        .bind(STATUS_PENDING)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// List all applications with applicant name and email for the admin
    /// review queue, newest first.
    pub async fn list_with_applicants(
        executor: impl PgExecutor<'_>,
    ) -> Result<Vec<HostApplicationWithApplicant>, sqlx::Error> {
        let query = "SELECT a.id, a.user_id, a.bio, a.teach_ideas, a.experiences, a.proof_links,
                            a.status, a.submitted_at, a.reviewed_at, a.rejection_feedback,
                            p.full_name AS applicant_name, u.email AS applicant_email
                     FROM host_applications a
                     JOIN users u ON u.id = a.user_id
                     JOIN profiles p ON p.user_id = a.user_id
                     ORDER BY a.submitted_at DESC, a.id DESC";
        sqlx::query_as::<_, HostApplicationWithApplicant>(query)
            .fetch_all(executor)
            .await
    }

    /// Mark a pending application approved.
    ///
    /// Returns `None` if the application does not exist or has already
    /// been reviewed.
    pub async fn approve(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<HostApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE host_applications
             SET status = $2, reviewed_at = NOW()
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostApplication>(&query)
            .bind(id)
            .bind(STATUS_APPROVED)
            .bind(STATUS_PENDING)
            .fetch_optional(executor)
            .await
    }

    /// Mark a pending application rejected, recording the feedback shown
    /// to the applicant.
    ///
    /// Returns `None` if the application does not exist or has already
    /// been reviewed.
    pub async fn reject(
        executor: impl PgExecutor<'_>,
        id: DbId,
        feedback: &str,
    ) -> Result<Option<HostApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE host_applications
             SET status = $2, reviewed_at = NOW(), rejection_feedback = $3
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HostApplication>(&query)
            .bind(id)
            .bind(STATUS_REJECTED)
            .bind(feedback)
            .bind(STATUS_PENDING)
            .fetch_optional(executor)
            .await
    }
}
