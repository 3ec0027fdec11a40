// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
// SPDX-License-Identifier: Apache-2.0

//! Submission payload validator.
//!
//! Ingress-level validation for the public submission endpoints:
//! - Required fields (name, email, message / quote)
//! - Length bounds on free-text fields
//! - Structural email check
//! - Optional testimonial website URL (http/https with a host) and rating

use crate::config::ValidationConfig;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Validation error types.
#[derive(Debug, Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} exceeds maximum length of {max}")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid website URL: {0}")]
    InvalidWebsite(String),

    #[error("Rating {0} outside allowed range 1-5")]
    RatingOutOfRange(u8),
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Payload is valid
    Valid,
    /// Payload is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Submission payload validator.
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a contact-form submission.
    pub fn validate_contact(&self, name: &str, email: &str, message: &str) -> ValidationResult {
        if let invalid @ ValidationResult::Invalid(_) = self.required("name", name, self.config.max_name_len) {
            return invalid;
        }

        let email = email.trim();
        if email.is_empty() {
            debug!("missing email");
            return ValidationResult::Invalid(ValidationError::MissingField("email"));
        }
        if !is_plausible_email(email) {
            debug!(email, "email failed structural check");
            return ValidationResult::Invalid(ValidationError::InvalidEmail(email.to_string()));
        }

        self.required("message", message, self.config.max_message_len)
    }

    /// Validate a testimonial submission.
    pub fn validate_testimonial(
        &self,
        name: &str,
        quote: &str,
        website: Option<&str>,
        rating: Option<u8>,
    ) -> ValidationResult {
        if let invalid @ ValidationResult::Invalid(_) = self.required("name", name, self.config.max_name_len) {
            return invalid;
        }
        if let invalid @ ValidationResult::Invalid(_) = self.required("quote", quote, self.config.max_message_len) {
            return invalid;
        }

        if let Some(website) = website.map(str::trim).filter(|w| !w.is_empty()) {
            if !is_http_url(website) {
                debug!(website, "website rejected");
                return ValidationResult::Invalid(ValidationError::InvalidWebsite(
                    website.to_string(),
                ));
            }
        }

        if let Some(rating) = rating {
            if !(1..=5).contains(&rating) {
                return ValidationResult::Invalid(ValidationError::RatingOutOfRange(rating));
            }
        }

        ValidationResult::Valid
    }

    fn required(&self, field: &'static str, value: &str, max: usize) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            debug!(field, "missing required field");
            return ValidationResult::Invalid(ValidationError::MissingField(field));
        }
        if value.chars().count() > max {
            debug!(field, max, "field too long");
            return ValidationResult::Invalid(ValidationError::FieldTooLong { field, max });
        }
        ValidationResult::Valid
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is the mail relay's problem, not ours.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs at least one dot with labels on both sides.
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}

/// Accept only http/https URLs with a real host.
fn is_http_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}
