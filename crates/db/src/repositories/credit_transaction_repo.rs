//! Repository for the append-only `credit_transactions` ledger.

use sqlx::PgExecutor;
use thetable_core::types::DbId;

use crate::models::credit_transaction::{CreateCreditTransaction, CreditTransaction};

const COLUMNS: &str = "id, user_id, transaction_type, amount, class_id, created_at";

/// Persistence for ledger entries. Rows are inserted and read, never
/// updated or deleted.
pub struct CreditTransactionRepo;

impl CreditTransactionRepo {
    /// Append a ledger entry, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateCreditTransaction,
    ) -> Result<CreditTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO credit_transactions (user_id, transaction_type, amount, class_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreditTransaction>(&query)
            .bind(input.user_id)
            .bind(&input.transaction_type)
            .bind(input.amount)
            .bind(input.class_id)
            .fetch_one(executor)
            .await
    }

    /// List a user's ledger entries, newest first.
    pub async fn list_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<CreditTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM credit_transactions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CreditTransaction>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }
}
