//! Admin review of host applications.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use thetable_core::application::{validate_rejection_feedback, validate_reviewable};
use thetable_core::error::CoreError;
use thetable_core::types::DbId;
use thetable_db::models::host_application::{HostApplication, HostApplicationWithApplicant};
use thetable_db::repositories::{HostApplicationRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/host-applications/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub feedback: String,
}

/// GET /api/v1/admin/host-applications
///
/// The full review queue with applicant identity, newest first. The
/// client splits pending from reviewed.
pub async fn list_applications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<HostApplicationWithApplicant>>> {
    let applications = HostApplicationRepo::list_with_applicants(&state.pool).await?;
    Ok(Json(applications))
}

/// POST /api/v1/admin/host-applications/{id}/approve
///
/// Flips the application to approved and marks the applicant's profile
/// host-verified in the same transaction. Review is monotonic: only a
/// pending application can flip, so a second approve (or a reject after
/// an approve) gets 409.
pub async fn approve_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<HostApplication>> {
    let mut tx = state.pool.begin().await?;

    let Some(application) = HostApplicationRepo::approve(&mut *tx, id).await? else {
        return Err(already_reviewed_or_missing(&state, id).await);
    };
    ProfileRepo::set_host_verified(&mut *tx, application.user_id, true).await?;

    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        application_id = id,
        applicant_id = application.user_id,
        "Host application approved"
    );

    Ok(Json(application))
}

/// POST /api/v1/admin/host-applications/{id}/reject
///
/// Stores the feedback shown to the applicant. Guarded by the same
/// pending-only transition as approve.
pub async fn reject_application(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<Json<HostApplication>> {
    validate_rejection_feedback(&input.feedback)?;

    let Some(application) =
        HostApplicationRepo::reject(&state.pool, id, input.feedback.trim()).await?
    else {
        return Err(already_reviewed_or_missing(&state, id).await);
    };

    tracing::info!(
        admin_id = admin.user_id,
        application_id = id,
        "Host application rejected"
    );

    Ok(Json(application))
}

/// Explain a review UPDATE that matched no row: the application either
/// does not exist (404) or has already left pending (409).
async fn already_reviewed_or_missing(state: &AppState, id: DbId) -> AppError {
    match HostApplicationRepo::find_by_id(&state.pool, id).await {
        Ok(Some(existing)) => match validate_reviewable(&existing.status) {
            Ok(()) => AppError::Core(CoreError::Conflict(
                "Application has already been reviewed".into(),
            )),
            Err(core) => AppError::Core(core),
        },
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "HostApplication",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}
