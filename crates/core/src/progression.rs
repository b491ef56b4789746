//! Watch-progress rules.
//!
//! A progression is the watched fraction of one video, in `[0, 1]`. Repeat
//! views keep the highest fraction seen; the storage layer applies that rule
//! atomically in its upsert.

use crate::error::CoreError;

/// Default number of entries in the "last watched" list.
pub const DEFAULT_HISTORY_LIMIT: i64 = 6;

/// Upper bound for a caller-supplied history limit.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Fraction at or above which a video counts as completed.
pub const COMPLETION_THRESHOLD: f64 = 0.95;

/// Validate a progression fraction: finite and within `[0, 1]`.
pub fn validate_progression(progression: f64) -> Result<(), CoreError> {
    if !progression.is_finite() {
        return Err(CoreError::Validation(
            "progression must be a finite number".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&progression) {
        return Err(CoreError::Validation(format!(
            "progression must be between 0 and 1, got {progression}"
        )));
    }
    Ok(())
}

/// Clamp a requested history limit into `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Whether a stored progression counts as a completed view.
pub fn is_completed(progression: f64) -> bool {
    progression >= COMPLETION_THRESHOLD
}
