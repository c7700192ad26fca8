//! Handlers for submitting host applications.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use thetable_core::application::{
    validate_bio, validate_experiences, validate_proof_links, validate_teach_ideas, Experience,
    ProofLink,
};
use thetable_core::error::CoreError;
use thetable_db::models::host_application::{CreateHostApplication, HostApplication};
use thetable_db::repositories::HostApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /host-applications`.
#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub bio: String,
    pub teach_ideas: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub proof_links: Vec<ProofLink>,
}

/// POST /api/v1/host-applications
///
/// Any authenticated member may apply to host. One pending application
/// per user; a rejected applicant may apply again.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitApplicationRequest>,
) -> AppResult<(StatusCode, Json<HostApplication>)> {
    // 1. Server-side re-validation of the application form rules.
    validate_bio(&input.bio)?;
    validate_teach_ideas(&input.teach_ideas)?;
    validate_experiences(&input.experiences)?;
    validate_proof_links(&input.proof_links)?;

    // 2. One live application at a time. The partial unique index on
    //    pending rows backstops two submissions racing past this check.
    if HostApplicationRepo::has_pending(&state.pool, user.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have a pending application".into(),
        )));
    }

    let application = HostApplicationRepo::create(
        &state.pool,
        &CreateHostApplication {
            user_id: user.user_id,
            bio: input.bio.trim().to_string(),
            teach_ideas: input.teach_ideas.trim().to_string(),
            experiences: SqlJson(input.experiences),
            proof_links: SqlJson(input.proof_links),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        application_id = application.id,
        "Host application submitted"
    );

    Ok((StatusCode::CREATED, Json(application)))
}
