//! Entry-point input validation.
//!
//! Runs before any network call so malformed input never reaches a provider.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static RECIPIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid recipient regex")
});

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("product name must not be empty")]
    EmptyProductName,
    #[error("'{0}' is not a well-formed email address")]
    InvalidRecipient(String),
}

/// Check that a product name is non-empty after trimming, returning the
/// trimmed name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyProductName`] for empty or whitespace-only
/// input.
pub fn validate_product_name(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyProductName);
    }
    Ok(trimmed)
}

/// Check that a recipient address is syntactically well-formed.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRecipient`] if the address does not look
/// like `local@domain.tld`.
pub fn validate_recipient(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if !RECIPIENT_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidRecipient(trimmed.to_string()));
    }
    Ok(trimmed)
}
