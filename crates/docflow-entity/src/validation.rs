//! Shared field validators for `#[derive(Validate)]` payloads.

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
