//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that do not meet
//! the gate. Use these in route handlers to enforce authorization at the
//! type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use thetable_core::error::CoreError;
use thetable_core::roles::ROLE_ADMIN;
use thetable_db::repositories::{ProfileRepo, RoleRepo, UserRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// The role claim in the token is re-checked against the users row, so a
/// token issued before a demotion or deactivation stops working for admin
/// routes immediately.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }

        let row = UserRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;
        if !row.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }
        let current_role = RoleRepo::resolve_name(&state.pool, row.role_id).await?;
        if current_role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }

        Ok(RequireAdmin(user))
    }
}

/// Requires a profile with `host_verified` set. Rejects with 403 otherwise.
///
/// Host verification lives on the profile row, not in the token, so this
/// always consults the database. Approval takes effect on the next request
/// without re-login.
///
/// ```ignore
/// async fn hosts_only(RequireVerifiedHost(user): RequireVerifiedHost) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireVerifiedHost(pub AuthUser);

impl FromRequestParts<AppState> for RequireVerifiedHost {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Only verified hosts can do this".into(),
                ))
            })?;
        if !profile.host_verified {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only verified hosts can do this".into(),
            )));
        }

        Ok(RequireVerifiedHost(user))
    }
}
