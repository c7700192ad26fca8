//! Booking rules: the pure admission predicate and status constants.
//!
//! The api layer re-runs [`check_booking`] inside the booking transaction,
//! against rows locked `FOR UPDATE`, so the answer cannot go stale between
//! the check and the writes.

use crate::error::CoreError;
use crate::ledger::total_balance;
use crate::types::DbId;

/// Status assigned to every booking at creation. There is no cancellation
/// flow, so no other status value is ever written.
pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";

/// Decide whether a viewer may book a class.
///
/// Checks, in order: the viewer is not the host, the class has a free
/// seat, and the viewer's combined balance covers the cost. The error
/// variants line up with the HTTP statuses the api layer surfaces
/// (403 own class, 409 full, 409 insufficient credits).
pub fn check_booking(
    viewer_id: DbId,
    host_id: DbId,
    topped_up_balance: i32,
    teaching_balance: i32,
    cost_credits: i32,
    max_participants: i32,
    booked_count: i32,
) -> Result<(), CoreError> {
    if viewer_id == host_id {
        return Err(CoreError::Forbidden(
            "You cannot book your own class".to_string(),
        ));
    }
    if booked_count >= max_participants {
        return Err(CoreError::Conflict("This class is full".to_string()));
    }
    if total_balance(topped_up_balance, teaching_balance) < cost_credits {
        return Err(CoreError::Conflict("Insufficient credits".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_booking_allowed_when_all_clauses_pass() {
        assert!(check_booking(2, 1, 3, 2, 5, 10, 4).is_ok());
    }

    #[test]
    fn test_host_cannot_book_own_class() {
        let result = check_booking(1, 1, 100, 100, 5, 10, 0);
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_full_class_rejected() {
        // Seven existing bookings against a seven-seat class.
        let result = check_booking(2, 1, 100, 100, 5, 7, 7);
        assert_matches!(result, Err(CoreError::Conflict(msg)) if msg.contains("full"));
    }

    #[test]
    fn test_overfull_class_rejected() {
        let result = check_booking(2, 1, 100, 100, 5, 7, 9);
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_insufficient_combined_balance_rejected() {
        let result = check_booking(2, 1, 2, 2, 5, 10, 0);
        assert_matches!(result, Err(CoreError::Conflict(msg)) if msg.contains("Insufficient"));
    }

    #[test]
    fn test_balance_across_buckets_counts() {
        // 3 purchased + 2 teaching covers a cost of 5 exactly.
        assert!(check_booking(2, 1, 3, 2, 5, 10, 0).is_ok());
    }

    #[test]
    fn test_full_class_takes_precedence_over_balance() {
        // Both clauses fail; the capacity rejection is reported.
        let result = check_booking(2, 1, 0, 0, 5, 7, 7);
        assert_matches!(result, Err(CoreError::Conflict(msg)) if msg.contains("full"));
    }

    #[test]
    fn test_last_seat_still_bookable() {
        assert!(check_booking(2, 1, 5, 0, 5, 7, 6).is_ok());
    }
}
