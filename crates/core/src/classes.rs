//! Class catalog constants and validation functions.
//!
//! A class is a small in-person session run by a verified host. Pricing is
//! product-fixed: every class costs [`DEFAULT_COST_CREDITS`] credits and
//! seats [`DEFAULT_MAX_PARTICIPANTS`] people at most.

use chrono::NaiveDate;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// The fixed set of class categories offered in the catalog.
pub const CATEGORIES: &[&str] = &[
    "Cooking",
    "Arts & Crafts",
    "Languages",
    "Sports & Fitness",
    "Music",
    "Technology",
    "Gardening",
    "Writing",
    "Photography",
    "Other",
];

/// Every class costs the same flat rate in credits.
pub const DEFAULT_COST_CREDITS: i32 = 5;

/// Every class seats at most this many participants.
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 10;

/// Minimum title length in characters.
pub const MIN_TITLE_LENGTH: usize = 5;

/// Minimum description length in characters.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Minimum street-address length in characters.
pub const MIN_ADDRESS_LENGTH: usize = 5;

/// Session duration bounds in hours.
pub const MIN_DURATION_HOURS: i32 = 1;
pub const MAX_DURATION_HOURS: i32 = 8;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate a class title (trimmed, at least 5 characters).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().chars().count() < MIN_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at least {MIN_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a class description (trimmed, at least 20 characters).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at least {MIN_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a category is one of the fixed catalog entries.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {}",
            CATEGORIES.join(", ")
        )))
    }
}

/// Validate the full street address shown to booked participants.
pub fn validate_address(address: &str) -> Result<(), CoreError> {
    if address.trim().chars().count() < MIN_ADDRESS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Please enter the full address (at least {MIN_ADDRESS_LENGTH} characters)"
        )));
    }
    Ok(())
}

/// Validate the session duration in hours.
pub fn validate_duration(duration_hours: i32) -> Result<(), CoreError> {
    if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&duration_hours) {
        return Err(CoreError::Validation(format!(
            "Duration must be between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS} hours"
        )));
    }
    Ok(())
}

/// Validate that a class is scheduled today or later.
pub fn validate_class_date(class_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if class_date < today {
        return Err(CoreError::Validation(
            "Class date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Seats still available given the confirmed booking count. Never negative.
pub fn seats_remaining(max_participants: i32, booked_count: i32) -> i32 {
    (max_participants - booked_count).max(0)
}
