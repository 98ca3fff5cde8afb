use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form::{FieldError, FieldErrors, FormField};

/// Loose `local@domain.tld` shape, matched against the untrimmed input.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// The values a visitor typed into the contact form.
///
/// This is also the payload handed to the message relay, which is why it
/// serializes to exactly the three template parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
    }

    /// Checks every field independently, so several errors can be reported
    /// at once.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, FieldError::NameRequired);
        }

        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, FieldError::EmailRequired);
        } else if !EMAIL_REGEX.is_match(&self.email) {
            errors.insert(FormField::Email, FieldError::EmailInvalid);
        }

        if self.message.trim().is_empty() {
            errors.insert(FormField::Message, FieldError::MessageRequired);
        }

        errors
    }
}
