//! Host application constants, field records, and validation functions.
//!
//! Applying to host is free-text heavy, so the rules here are mostly
//! minimum lengths. The same functions run on submission (api layer) and
//! in unit tests; nothing is trusted from the client.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Application awaiting admin review.
pub const STATUS_PENDING: &str = "pending";

/// Application approved; the applicant's profile is host-verified.
pub const STATUS_APPROVED: &str = "approved";

/// Application rejected with feedback.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid application status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Minimum length for the applicant bio.
pub const MIN_BIO_LENGTH: usize = 30;

/// Minimum length for the what-would-you-teach field.
pub const MIN_TEACH_IDEAS_LENGTH: usize = 30;

/// Minimum length for rejection feedback written by an admin.
pub const MIN_REJECTION_FEEDBACK_LENGTH: usize = 10;

/* --------------------------------------------------------------------------
Field records
-------------------------------------------------------------------------- */

/// One prior-experience entry on an application (stored as JSONB).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Experience {
    /// What the experience was, e.g. "Taught pottery evening classes".
    pub name: String,
    /// Years of experience, digits only.
    pub years: String,
}

/// One supporting link on an application (stored as JSONB).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofLink {
    /// Short label, e.g. "My portfolio".
    pub label: String,
    /// Absolute http(s) URL.
    pub url: String,
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate the applicant bio (trimmed, at least 30 characters).
pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    if bio.trim().chars().count() < MIN_BIO_LENGTH {
        return Err(CoreError::Validation(
            "Please write at least 2-3 sentences about yourself".to_string(),
        ));
    }
    Ok(())
}

/// Validate the teach-ideas field (trimmed, at least 30 characters).
pub fn validate_teach_ideas(teach_ideas: &str) -> Result<(), CoreError> {
    if teach_ideas.trim().chars().count() < MIN_TEACH_IDEAS_LENGTH {
        return Err(CoreError::Validation(
            "Please write at least 2-3 sentences about what you would teach".to_string(),
        ));
    }
    Ok(())
}

/// Validate the optional experience entries: each needs a name, and years
/// must be digits only.
pub fn validate_experiences(experiences: &[Experience]) -> Result<(), CoreError> {
    for entry in experiences {
        if entry.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Experience name is required".to_string(),
            ));
        }
        let years = entry.years.trim();
        if years.is_empty() || !years.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::Validation(
                "Years of experience must be a number".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate the optional proof links: each needs a label and an absolute
/// http(s) URL.
pub fn validate_proof_links(proof_links: &[ProofLink]) -> Result<(), CoreError> {
    for link in proof_links {
        if link.label.trim().is_empty() {
            return Err(CoreError::Validation("Link label is required".to_string()));
        }
        if !is_http_url(link.url.trim()) {
            return Err(CoreError::Validation(
                "Please enter a valid URL (must start with http:// or https://)".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate admin rejection feedback (trimmed, at least 10 characters).
pub fn validate_rejection_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.trim().chars().count() < MIN_REJECTION_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(
            "Please provide feedback (minimum 10 characters)".to_string(),
        ));
    }
    Ok(())
}

/// An application can only be reviewed while pending. Approved and
/// rejected are terminal.
pub fn validate_reviewable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_PENDING {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Application has already been reviewed (status: {status})"
        )))
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty() && !rest.contains(char::is_whitespace)
}
