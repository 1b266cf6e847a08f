//! Contact form input and its validation rules.

use serde::Deserialize;

use crate::domain::error::DomainError;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_EMAIL_CHARS: usize = 320;

/// Raw form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A submission that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormInput {
    pub fn validate(&self, max_message_chars: usize) -> Result<NewSubmission, DomainError> {
        let name = required("name", &self.name, MAX_NAME_CHARS)?;
        let email = required("email", &self.email, MAX_EMAIL_CHARS)?;
        if !looks_like_email(&email) {
            return Err(DomainError::validation(
                "email",
                "enter a valid email address",
            ));
        }
        let message = required("message", &self.message, max_message_chars)?;

        Ok(NewSubmission {
            name,
            email,
            message,
        })
    }
}

fn required(field: &'static str, raw: &str, max_chars: usize) -> Result<String, DomainError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "this field is required"));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(value.to_string())
}

fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
        }
        _ => false,
    }
}
