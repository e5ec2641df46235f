//! Contact-form inquiry types and server-side validation.
//!
//! The relay validates every submission before any outbound call; the same
//! rules are available to clients that want to pre-check a form. Validation
//! errors are reported per field, all at once, keyed by the JSON field name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-field validation messages, keyed by the JSON field name.
pub type FieldErrors = BTreeMap<String, String>;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// A visitor's contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl InquiryForm {
    /// Validate all fields against their trimmed values.
    ///
    /// Every invalid field is reported; valid fields never appear in the map.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), NAME_REQUIRED.to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email".to_string(), EMAIL_REQUIRED.to_string());
        } else if !is_valid_email(email) {
            errors.insert("email".to_string(), EMAIL_INVALID.to_string());
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert("phone".to_string(), PHONE_REQUIRED.to_string());
        } else if !is_valid_phone(phone) {
            errors.insert("phone".to_string(), PHONE_INVALID.to_string());
        }

        if self.message.trim().is_empty() {
            errors.insert("message".to_string(), MESSAGE_REQUIRED.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// The uniform response shape returned by the inquiry relay.
///
/// `success == true` implies `data` is absent. Validation failures populate
/// `data`; delivery failures populate `detail`. Clients branch on `success`
/// only, never on the HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl InquiryResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            detail: None,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: Some(errors),
            detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            detail: Some(detail.into()),
        }
    }
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot in the
/// domain with non-empty segments on both sides.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Digits plus common punctuation, with at least 7 digits overall.
fn is_valid_phone(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= 7
}
