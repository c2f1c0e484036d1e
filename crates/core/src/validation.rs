//! Required-field checks shared by the DB and API layers.
//!
//! Presence is the only rule these records have; everything else is free text.

use crate::error::CoreError;

/// Return the trimmed value, or a validation error naming `field`.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' is required")));
    }
    Ok(trimmed)
}

/// Like [`require_text`] for optional inputs: `None` counts as missing.
pub fn require_present<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    require_text(field, value.unwrap_or_default())
}

/// Normalise an optional text field: blank becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
