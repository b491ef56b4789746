//! Private page input rules.
//!
//! A private page is a doctor-curated subset of videos (plus uploaded
//! documents) shared with one patient, who is identified by name and phone.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a patient name after trimming.
pub const MAX_PATIENT_NAME_LEN: usize = 200;

/// Accepted number of digits in a patient phone number.
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Domain of generated placeholder addresses for patients without email.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "placeholder.medoh";

/// Trim a patient name and check it is non-empty and not too long.
pub fn normalize_patient_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "patient name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_PATIENT_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "patient name must be at most {MAX_PATIENT_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim a phone number and check its shape.
///
/// Digits, spaces, `+`, `-`, `(` and `)` are accepted; the digit count must be
/// within [`MIN_PHONE_DIGITS`]..=[`MAX_PHONE_DIGITS`].
pub fn normalize_patient_phone(phone: &str) -> Result<String, CoreError> {
    let trimmed = phone.trim();
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(*c, ' ' | '+' | '-' | '(' | ')')))
    {
        return Err(CoreError::Validation(format!(
            "patient phone contains invalid character '{bad}'"
        )));
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "patient phone must have {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits, got {digits}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Build the unique placeholder address stored for a patient.
pub fn placeholder_email(phone: &str, unique_suffix: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{compact}_{unique_suffix}@{PLACEHOLDER_EMAIL_DOMAIN}")
}

/// Derive a document's file type from the extension of its URL path.
pub fn file_type_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => "unknown".to_string(),
    }
}

/// Drop repeated video ids, keeping the first occurrence.
pub fn dedup_video_ids(video_ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(video_ids.len());
    video_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}
