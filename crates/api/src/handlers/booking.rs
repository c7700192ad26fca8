//! The booking flow: one transaction covering capacity, debit, booking
//! row, and ledger entry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use thetable_core::booking::check_booking;
use thetable_core::error::CoreError;
use thetable_core::ledger::{plan_debit, TX_TYPE_BOOKING};
use thetable_core::types::DbId;
use thetable_db::models::booking::{Booking, CreateBooking};
use thetable_db::models::credit_transaction::CreateCreditTransaction;
use thetable_db::repositories::{BookingRepo, ClassRepo, CreditTransactionRepo, CreditsRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::me::CreditBalances;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for a successful booking: the new row plus the refreshed
/// balances, so the client needs no follow-up fetch.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
    pub credits: CreditBalances,
}

/// POST /api/v1/classes/{id}/bookings
///
/// Everything runs inside one transaction with the class row and the
/// caller's credits row locked, so two rivals for the last seat
/// serialize and the loser gets the capacity rejection rather than an
/// oversold class.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(class_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let mut tx = state.pool.begin().await?;

    // 1. Lock the class row.
    let class = ClassRepo::find_by_id_for_update(&mut *tx, class_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id: class_id,
        }))?;

    // 2. Current occupancy, then the caller's balances, also locked.
    let booked_count = BookingRepo::count_for_class(&mut *tx, class_id).await?;
    let credits = CreditsRepo::find_by_user_for_update(&mut *tx, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Credits",
            id: user.user_id,
        }))?;

    // 3. Admission rules. An early return drops the transaction and
    //    rolls everything back.
    check_booking(
        user.user_id,
        class.host_id,
        credits.topped_up_balance,
        credits.teaching_balance,
        class.cost_credits,
        class.max_participants,
        booked_count as i32,
    )?;

    // 4. Duplicate check. uq_bookings_class_user backstops the race.
    if BookingRepo::exists_for_user_and_class(&mut *tx, user.user_id, class_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already booked this class".into(),
        )));
    }

    // 5. Book, debit teaching-first, and append the ledger entry.
    let booking = BookingRepo::create(
        &mut *tx,
        &CreateBooking {
            class_id,
            user_id: user.user_id,
        },
    )
    .await?;
    let plan = plan_debit(
        credits.topped_up_balance,
        credits.teaching_balance,
        class.cost_credits,
    )?;
    let updated = CreditsRepo::apply_debit(
        &mut *tx,
        user.user_id,
        plan.new_topped_up_balance,
        plan.new_teaching_balance,
    )
    .await?;
    CreditTransactionRepo::create(
        &mut *tx,
        &CreateCreditTransaction {
            user_id: user.user_id,
            transaction_type: TX_TYPE_BOOKING.to_string(),
            amount: -class.cost_credits,
            class_id: Some(class_id),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = user.user_id, class_id, "Booking confirmed");

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking,
            credits: updated.into(),
        }),
    ))
}
