//! Credit transaction (ledger entry) model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use thetable_core::types::{DbId, Timestamp};

/// An append-only ledger row from the `credit_transactions` table.
///
/// `amount` is signed: positive for top-ups, negative for booking debits.
/// `class_id` is set only on booking rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreditTransaction {
    pub id: DbId,
    pub user_id: DbId,
    pub transaction_type: String,
    pub amount: i32,
    pub class_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a ledger row.
#[derive(Debug)]
pub struct CreateCreditTransaction {
    pub user_id: DbId,
    pub transaction_type: String,
    pub amount: i32,
    pub class_id: Option<DbId>,
}
