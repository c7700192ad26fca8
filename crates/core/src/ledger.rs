//! Credit-ledger constants and arithmetic.
//!
//! Balances live in two buckets: `topped_up_balance` (purchased) and
//! `teaching_balance` (earned by teaching). Debits consume the teaching
//! bucket first; top-ups only ever credit the purchased bucket. The
//! functions here are pure -- the db layer applies the resulting plan
//! inside a transaction.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Transaction type recorded for a credit purchase.
pub const TX_TYPE_TOP_UP: &str = "top_up";

/// Transaction type recorded for a class booking debit.
pub const TX_TYPE_BOOKING: &str = "booking";

/// All valid transaction type values.
pub const VALID_TX_TYPES: &[&str] = &[TX_TYPE_TOP_UP, TX_TYPE_BOOKING];

/// Minimum top-up amount in pounds sterling.
pub const MIN_TOPUP_POUNDS: f64 = 2.0;

/// Exchange rate: pounds per credit.
pub const POUNDS_PER_CREDIT: f64 = 2.0;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// The outcome of planning a debit against a two-bucket balance.
///
/// `from_teaching + from_topped_up` always equals the debited amount, and
/// the new balances are both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebitPlan {
    /// Credits taken from the teaching bucket.
    pub from_teaching: i32,
    /// Credits taken from the topped-up bucket.
    pub from_topped_up: i32,
    /// Teaching balance after the debit.
    pub new_teaching_balance: i32,
    /// Topped-up balance after the debit.
    pub new_topped_up_balance: i32,
}

/* --------------------------------------------------------------------------
Functions
-------------------------------------------------------------------------- */

/// Total spendable balance across both buckets.
pub fn total_balance(topped_up_balance: i32, teaching_balance: i32) -> i32 {
    topped_up_balance + teaching_balance
}

/// Plan a debit of `amount` credits, consuming the teaching bucket first.
///
/// Returns `Conflict` when the combined balance cannot cover the amount,
/// so an insufficient-credits rejection surfaces as HTTP 409 rather than a
/// constraint violation deep in the database.
pub fn plan_debit(
    topped_up_balance: i32,
    teaching_balance: i32,
    amount: i32,
) -> Result<DebitPlan, CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "Debit amount must be positive, got {amount}"
        )));
    }
    if amount > total_balance(topped_up_balance, teaching_balance) {
        return Err(CoreError::Conflict("Insufficient credits".to_string()));
    }

    let from_teaching = teaching_balance.min(amount);
    let from_topped_up = amount - from_teaching;

    Ok(DebitPlan {
        from_teaching,
        from_topped_up,
        new_teaching_balance: teaching_balance - from_teaching,
        new_topped_up_balance: topped_up_balance - from_topped_up,
    })
}

/// Convert a top-up amount in pounds to whole credits (2 pounds = 1 credit,
/// fractional remainder discarded).
pub fn pounds_to_credits(pounds: f64) -> i32 {
    (pounds / POUNDS_PER_CREDIT).floor() as i32
}

/// Validate a requested top-up amount.
pub fn validate_top_up_amount(pounds: f64) -> Result<(), CoreError> {
    if !pounds.is_finite() || pounds < MIN_TOPUP_POUNDS {
        return Err(CoreError::Validation(format!(
            "Minimum top-up amount is \u{a3}{MIN_TOPUP_POUNDS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_total_balance_sums_both_buckets() {
        assert_eq!(total_balance(3, 2), 5);
        assert_eq!(total_balance(0, 0), 0);
    }

    #[test]
    fn test_debit_consumes_teaching_first() {
        // 3 purchased + 2 teaching, cost 4: teaching drains to 0,
        // remainder comes out of the purchased bucket.
        let plan = plan_debit(3, 2, 4).unwrap();
        assert_eq!(plan.from_teaching, 2);
        assert_eq!(plan.from_topped_up, 2);
        assert_eq!(plan.new_teaching_balance, 0);
        assert_eq!(plan.new_topped_up_balance, 1);
    }

    #[test]
    fn test_debit_covered_entirely_by_teaching() {
        let plan = plan_debit(10, 8, 5).unwrap();
        assert_eq!(plan.from_teaching, 5);
        assert_eq!(plan.from_topped_up, 0);
        assert_eq!(plan.new_teaching_balance, 3);
        assert_eq!(plan.new_topped_up_balance, 10);
    }

    #[test]
    fn test_debit_with_empty_teaching_bucket() {
        let plan = plan_debit(7, 0, 5).unwrap();
        assert_eq!(plan.from_teaching, 0);
        assert_eq!(plan.from_topped_up, 5);
        assert_eq!(plan.new_topped_up_balance, 2);
    }

    #[test]
    fn test_debit_of_exact_total_empties_both_buckets() {
        let plan = plan_debit(3, 2, 5).unwrap();
        assert_eq!(plan.new_teaching_balance, 0);
        assert_eq!(plan.new_topped_up_balance, 0);
    }

    #[test]
    fn test_debit_conserves_total() {
        // teaching' + topped_up' must equal total - amount for any valid debit.
        for (topped_up, teaching, amount) in [(3, 2, 4), (10, 0, 1), (0, 6, 6), (5, 5, 7)] {
            let plan = plan_debit(topped_up, teaching, amount).unwrap();
            assert_eq!(
                plan.new_teaching_balance + plan.new_topped_up_balance,
                total_balance(topped_up, teaching) - amount
            );
            assert!(plan.new_teaching_balance >= 0);
            assert!(plan.new_topped_up_balance >= 0);
            assert_eq!(plan.from_teaching + plan.from_topped_up, amount);
        }
    }

    #[test]
    fn test_debit_exceeding_balance_is_conflict() {
        let result = plan_debit(3, 1, 5);
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_debit_of_zero_is_rejected() {
        assert_matches!(plan_debit(3, 2, 0), Err(CoreError::Validation(_)));
        assert_matches!(plan_debit(3, 2, -1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_pounds_to_credits_floors() {
        assert_eq!(pounds_to_credits(2.0), 1);
        assert_eq!(pounds_to_credits(3.0), 1);
        assert_eq!(pounds_to_credits(4.0), 2);
        assert_eq!(pounds_to_credits(5.5), 2);
        assert_eq!(pounds_to_credits(10.0), 5);
    }

    #[test]
    fn test_top_up_minimum_enforced() {
        assert!(validate_top_up_amount(2.0).is_ok());
        assert!(validate_top_up_amount(20.0).is_ok());
        assert_matches!(validate_top_up_amount(1.99), Err(CoreError::Validation(_)));
        assert_matches!(validate_top_up_amount(0.0), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_top_up_amount(f64::NAN),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_tx_type_constants() {
        assert!(VALID_TX_TYPES.contains(&TX_TYPE_TOP_UP));
        assert!(VALID_TX_TYPES.contains(&TX_TYPE_BOOKING));
        assert_eq!(VALID_TX_TYPES.len(), 2);
    }
}
