//! Lightweight checks for the sign-up and suggestion forms.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Outcome of a single form-field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldCheck {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

#[must_use]
pub fn validate_email(email: &str) -> FieldCheck {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return FieldCheck::fail("Email is required");
    }
    if !EMAIL_RE.is_match(trimmed) {
        return FieldCheck::fail("Please enter a valid email address");
    }
    FieldCheck::ok()
}

/// Length is counted in characters, not bytes.
#[must_use]
pub fn validate_password(password: Option<&str>, min_length: usize) -> FieldCheck {
    match password {
        None | Some("") => FieldCheck::fail("Password is required"),
        Some(p) if p.chars().count() < min_length => {
            FieldCheck::fail(format!("Password must be at least {min_length} characters"))
        }
        Some(_) => FieldCheck::ok(),
    }
}

#[must_use]
pub fn validate_required(value: &str, field_name: &str) -> FieldCheck {
    if value.trim().is_empty() {
        return FieldCheck::fail(format!("{field_name} is required"));
    }
    FieldCheck::ok()
}

/// Display name derived from an email address: everything before the first `@`.
///
/// Falls back to `"user"` when there is nothing usable.
#[must_use]
pub fn username_from_email(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("user")
        .to_string()
}
