//! Field validation rules shared by the domain aggregates.
//!
//! Every rule is enforced at construction time and again on each mutating
//! setter, so an aggregate that exists is always well-formed.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// A domain validation failure, raised synchronously at the point of
/// construction or mutation, never deferred to persistence time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid email format: {0}")]
    InvalidEmail(String),
    #[error("invalid phone format: {0}")]
    InvalidPhone(String),
    #[error("price cannot be negative: {0}")]
    NegativePrice(f64),
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// Accepted forms: +7-XXX-XXX-XX-XX, 8 (XXX) XXX XX XX and the separator
// variations in between (10 digits grouped 3-3-2-2).
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+7|8)[-\s]?\(?\d{3}\)?[-\s]?\d{3}[-\s]?\d{2}[-\s]?\d{2}$")
        .expect("valid phone regex")
});

pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(value) {
        return Err(ValidationError::InvalidPhone(value.to_string()));
    }
    Ok(())
}

pub fn validate_price(value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativePrice(value));
    }
    Ok(())
}

pub fn validate_quantity(value: u32) -> Result<(), ValidationError> {
    if value < 1 {
        return Err(ValidationError::InvalidQuantity(value));
    }
    Ok(())
}
