use std::{collections::BTreeMap, fmt, str::FromStr};

use thiserror::Error;

use crate::contact::ContactFormFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field: {0:?}")]
pub struct UnknownFormField(pub String);

impl FromStr for FormField {
    type Err = UnknownFormField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFormField(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: FormField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(FormField, FieldError)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (FormField, FieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Why the last submit attempt ended in [`SubmissionPhase::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// At least one field did not pass validation, the relay was never
    /// contacted.
    Validation,
    /// The relay could not deliver the message.
    Transport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureReason),
}

impl SubmissionPhase {
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }

    /// Whether this phase shows a status line that expires on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// The complete state of one mounted contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactFormFields,
    pub field_errors: FieldErrors,
    pub phase: SubmissionPhase,
}

impl ContactForm {
    /// Stores `value` and drops any error previously reported for `field`
    /// without validating it again.
    pub fn update_field(&mut self, field: FormField, value: String) {
        self.fields.set(field, value);
        self.field_errors.remove(field);
    }

    /// Replaces all field errors with the result of a fresh validation pass.
    /// Returns `true` if every field is valid.
    pub fn validate(&mut self) -> bool {
        self.field_errors = self.fields.validate();
        self.field_errors.is_empty()
    }

    pub fn clear_fields(&mut self) {
        self.fields = ContactFormFields::default();
    }
}
