//! What the contact section renders for a given form state.
//!
//! The view holds no logic of its own: every flag and text below is derived
//! from a [`ContactForm`] snapshot, so the rendering layer only needs to bind
//! inputs to [`ContactFormController::update_field`] and the submit control
//! to [`ContactFormController::submit`].
//!
//! [`ContactFormController::update_field`]: crate::ContactFormController::update_field
//! [`ContactFormController::submit`]: crate::ContactFormController::submit

use folio_models::form::{ContactForm, FieldError, FormField, SubmissionPhase};

pub const SUCCESS_TEXT: &str = "✓ Message sent! I'll get back to you soon.";
pub const FAILURE_TEXT: &str = "✗ Failed to send. Please try again or email me directly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormView {
    pub fields: Vec<FieldView>,
    pub submit: SubmitView,
    pub status: Option<StatusLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FormField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
    pub value: String,
    pub error: Option<FieldError>,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitView {
    pub label: &'static str,
    pub disabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// Accessibility role of the status element.
    pub fn role(self) -> &'static str {
        match self {
            Self::Success => "status",
            Self::Error => "alert",
        }
    }
}

impl FieldView {
    pub fn invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Id of the element describing the error, if there is one.
    pub fn error_id(&self) -> Option<String> {
        self.error.map(|_| format!("{}-error", self.field))
    }
}

impl ContactFormView {
    pub fn new(form: &ContactForm) -> Self {
        let submitting = form.phase.is_submitting();

        let fields = FormField::ALL
            .into_iter()
            .map(|field| {
                let (label, placeholder) = match field {
                    FormField::Name => ("Your Name", "John Doe"),
                    FormField::Email => ("Your Email", "john@example.com"),
                    FormField::Message => ("Your Message", "Tell me about your project..."),
                };
                FieldView {
                    field,
                    label,
                    placeholder,
                    multiline: field == FormField::Message,
                    value: form.fields.get(field).into(),
                    error: form.field_errors.get(field),
                    disabled: submitting,
                }
            })
            .collect();

        let submit = SubmitView {
            label: if submitting {
                "Sending..."
            } else {
                "Send Message"
            },
            disabled: submitting,
            busy: submitting,
        };

        let status = match form.phase {
            SubmissionPhase::Succeeded => Some(StatusLine {
                kind: StatusKind::Success,
                text: SUCCESS_TEXT,
            }),
            SubmissionPhase::Failed(_) => Some(StatusLine {
                kind: StatusKind::Error,
                text: FAILURE_TEXT,
            }),
            SubmissionPhase::Idle | SubmissionPhase::Submitting => None,
        };

        Self {
            fields,
            submit,
            status,
        }
    }

    pub fn field(&self, field: FormField) -> &FieldView {
        // `fields` always holds one view per field, in `FormField::ALL` order.
        &self.fields[field as usize]
    }
}

/// Direct ways to reach the site owner, shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickLink {
    pub text: &'static str,
    pub href: String,
}

impl QuickLink {
    /// Whether the link leaves the site and should open in a new tab.
    pub fn external(&self) -> bool {
        !self.href.starts_with("mailto:")
    }
}

pub fn quick_links(email: &str, github: &str, linkedin: &str) -> Vec<QuickLink> {
    vec![
        QuickLink {
            text: "Send Email",
            href: format!("mailto:{email}"),
        },
        QuickLink {
            text: "GitHub",
            href: github.into(),
        },
        QuickLink {
            text: "LinkedIn",
            href: linkedin.into(),
        },
    ]
}
