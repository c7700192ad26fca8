//! Handlers for the `/me` resource: the caller's account, profile,
//! balances, bookings, hosted classes, ledger, and host application.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use thetable_core::error::CoreError;
use thetable_core::ledger::{
    pounds_to_credits, total_balance, validate_top_up_amount, TX_TYPE_TOP_UP,
};
use thetable_core::types::DbId;
use thetable_db::models::booking::BookingWithClass;
use thetable_db::models::class::Class;
use thetable_db::models::credit_transaction::{CreateCreditTransaction, CreditTransaction};
use thetable_db::models::credits::Credits;
use thetable_db::models::host_application::HostApplication;
use thetable_db::models::profile::{Profile, UpdateProfile};
use thetable_db::repositories::{
    BookingRepo, ClassRepo, CreditTransactionRepo, CreditsRepo, HostApplicationRepo, ProfileRepo,
    RoleRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The caller's account, profile, and balances in one response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub profile: Profile,
    pub credits: CreditBalances,
}

/// Credit balances with the derived spendable total.
#[derive(Debug, Serialize)]
pub struct CreditBalances {
    pub topped_up_balance: i32,
    pub teaching_balance: i32,
    pub total_balance: i32,
}

impl From<Credits> for CreditBalances {
    fn from(credits: Credits) -> Self {
        CreditBalances {
            total_balance: total_balance(credits.topped_up_balance, credits.teaching_balance),
            topped_up_balance: credits.topped_up_balance,
            teaching_balance: credits.teaching_balance,
        }
    }
}

/// Request body for `POST /me/credits/top-up`.
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    pub pounds: f64,
}

/// Response for a successful top-up.
#[derive(Debug, Serialize)]
pub struct TopUpResponse {
    pub credits_added: i32,
    pub credits: CreditBalances,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/me
///
/// The single source of truth for "who am I and what can I spend".
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<MeResponse>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    let role = RoleRepo::resolve_name(&state.pool, account.role_id).await?;
    let profile = ProfileRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    let credits = CreditsRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Credits",
            id: user.user_id,
        }))?;

    Ok(Json(MeResponse {
        id: account.id,
        email: account.email,
        role,
        profile,
        credits: credits.into(),
    }))
}

/// PUT /api/v1/me/profile
///
/// Partial update: absent fields keep their stored value.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    if let Some(full_name) = &input.full_name {
        if full_name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Full name cannot be empty".into(),
            )));
        }
    }

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    Ok(Json(profile))
}

/// GET /api/v1/me/bookings
///
/// The caller's bookings joined with class facts, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<BookingWithClass>>> {
    let bookings = BookingRepo::list_for_user_with_class(&state.pool, user.user_id).await?;
    Ok(Json(bookings))
}

/// GET /api/v1/me/classes
///
/// Classes the caller hosts, soonest first.
pub async fn list_classes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Class>>> {
    let classes = ClassRepo::list_by_host(&state.pool, user.user_id).await?;
    Ok(Json(classes))
}

/// GET /api/v1/me/transactions
///
/// The caller's credit ledger, newest first.
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<CreditTransaction>>> {
    let transactions = CreditTransactionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(transactions))
}

/// GET /api/v1/me/host-application
///
/// The caller's most recent application; 404 when they never applied.
pub async fn get_host_application(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<HostApplication>> {
    let application = HostApplicationRepo::find_latest_by_user(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HostApplication",
            id: user.user_id,
        }))?;
    Ok(Json(application))
}

/// POST /api/v1/me/credits/top-up
///
/// Simulated purchase: no payment processor is wired up, the balance is
/// credited directly. Two pounds buy one credit; fractional remainders
/// are discarded.
pub async fn top_up(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<TopUpRequest>,
) -> AppResult<Json<TopUpResponse>> {
    validate_top_up_amount(input.pounds)?;
    let credits_added = pounds_to_credits(input.pounds);

    // Balance change and ledger row commit together.
    let mut tx = state.pool.begin().await?;
    let updated = CreditsRepo::add_topped_up(&mut *tx, user.user_id, credits_added).await?;
    CreditTransactionRepo::create(
        &mut *tx,
        &CreateCreditTransaction {
            user_id: user.user_id,
            transaction_type: TX_TYPE_TOP_UP.to_string(),
            amount: credits_added,
            class_id: None,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = user.user_id, credits_added, "Credits topped up");

    Ok(Json(TopUpResponse {
        credits_added,
        credits: updated.into(),
    }))
}
