//! Contact form state and its submission state machine
//!
//! All transitions go through [`reduce`], so the machine can be exercised
//! without a network or a timer.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
}

/// Notice shown after a successful delivery
pub const SENT_MESSAGE: &str = "Message sent successfully!";

/// Field values of the contact form; also the JSON request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    /// Per-field problems; empty when the form may be submitted
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.set(Field::Name, "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.set(Field::Email, "Email is required");
        } else if !EMAIL.is_match(&self.email) {
            errors.set(Field::Email, "Please enter a valid email");
        }
        if self.subject.trim().is_empty() {
            errors.set(Field::Subject, "Subject is required");
        }
        if self.message.trim().is_empty() {
            errors.set(Field::Message, "Message is required");
        }

        errors
    }
}

/// One input of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Form control name, matching the JSON key
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

/// Validation messages, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn len(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    fn set(&mut self, field: Field, message: &str) {
        *self.slot_mut(field) = Some(message.to_string());
    }

    fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }
}

/// Where a submission stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient notification raised when a submission resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything the contact widget holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactState {
    pub form: ContactFormData,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    pub notice: Option<Notice>,
}

impl ContactState {
    /// State pre-filled with `form`, as if the user had typed it
    pub fn with_form(form: ContactFormData) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEvent {
    /// The user changed a field
    Edit(Field, String),
    /// The user pressed send
    Submit,
    /// The endpoint accepted the message
    Delivered,
    /// The request failed; carries the best available reason
    Failed(String),
    /// The success display delay ran out
    ResetElapsed,
}

/// Apply one event to the current state
pub fn reduce(mut state: ContactState, event: ContactEvent) -> ContactState {
    match event {
        ContactEvent::Edit(field, value) => {
            state.form.set(field, value);
            state.errors.clear(field);
        }
        ContactEvent::Submit => {
            if state.status == SubmissionStatus::Sending {
                return state;
            }
            let errors = state.form.validate();
            if errors.is_empty() {
                state.errors = errors;
                state.status = SubmissionStatus::Sending;
                state.notice = None;
            } else {
                state.errors = errors;
            }
        }
        ContactEvent::Delivered => {
            if state.status == SubmissionStatus::Sending {
                state.status = SubmissionStatus::Success;
                state.form = ContactFormData::default();
                state.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: SENT_MESSAGE.to_string(),
                });
            }
        }
        ContactEvent::Failed(reason) => {
            if state.status == SubmissionStatus::Sending {
                state.status = SubmissionStatus::Error;
                state.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: format!("Error: {}", reason),
                });
            }
        }
        ContactEvent::ResetElapsed => {
            if state.status == SubmissionStatus::Success {
                state.status = SubmissionStatus::Idle;
                state.notice = None;
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFormData {
        ContactFormData {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Nice site".to_string(),
        }
    }

    #[test]
    fn test_empty_submit_sets_all_errors() {
        let state = reduce(ContactState::default(), ContactEvent::Submit);
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.errors.len(), 4);
        assert_eq!(state.errors.get(Field::Name), Some("Name is required"));
        assert_eq!(state.errors.get(Field::Email), Some("Email is required"));
        assert_eq!(state.errors.get(Field::Subject), Some("Subject is required"));
        assert_eq!(state.errors.get(Field::Message), Some("Message is required"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let form = ContactFormData {
            name: "   ".to_string(),
            ..filled()
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_email_pattern() {
        for bad in ["ada", "ada@example", "@.", "ada example.com"] {
            let form = ContactFormData {
                email: bad.to_string(),
                ..filled()
            };
            assert_eq!(
                form.validate().get(Field::Email),
                Some("Please enter a valid email"),
                "{bad}"
            );
        }
        for good in ["ada@example.com", "a@b.c", " x@y.z "] {
            let form = ContactFormData {
                email: good.to_string(),
                ..filled()
            };
            assert!(form.validate().is_empty(), "{good}");
        }
    }

    #[test]
    fn test_edit_clears_only_that_error() {
        let state = reduce(ContactState::default(), ContactEvent::Submit);
        let state = reduce(state, ContactEvent::Edit(Field::Name, "A".to_string()));
        assert_eq!(state.form.name, "A");
        assert_eq!(state.errors.get(Field::Name), None);
        assert_eq!(state.errors.len(), 3);

        // Clearing does not re-validate, even for a still-invalid value
        let state = reduce(state, ContactEvent::Edit(Field::Email, "nope".to_string()));
        assert_eq!(state.errors.get(Field::Email), None);
    }

    #[test]
    fn test_valid_submit_moves_to_sending() {
        let state = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        assert_eq!(state.status, SubmissionStatus::Sending);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_submit_ignored_while_sending() {
        let sending = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        let mut emptied = sending.clone();
        emptied.form = ContactFormData::default();

        // Even an invalid form is not re-validated mid-flight
        let after = reduce(emptied.clone(), ContactEvent::Submit);
        assert_eq!(after, emptied);
    }

    #[test]
    fn test_delivered_clears_form() {
        let state = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        let state = reduce(state, ContactEvent::Delivered);
        assert_eq!(state.status, SubmissionStatus::Success);
        assert_eq!(state.form, ContactFormData::default());
        assert_eq!(
            state.notice,
            Some(Notice {
                kind: NoticeKind::Success,
                message: SENT_MESSAGE.to_string()
            })
        );

        let state = reduce(state, ContactEvent::ResetElapsed);
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_failed_keeps_form() {
        let state = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        let state = reduce(state, ContactEvent::Failed("boom".to_string()));
        assert_eq!(state.status, SubmissionStatus::Error);
        assert_eq!(state.form, filled());
        assert_eq!(state.notice.unwrap().message, "Error: boom");
    }

    #[test]
    fn test_error_does_not_auto_revert() {
        let state = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        let state = reduce(state, ContactEvent::Failed("boom".to_string()));
        let state = reduce(state, ContactEvent::ResetElapsed);
        assert_eq!(state.status, SubmissionStatus::Error);

        // A new attempt leaves the error state
        let state = reduce(state, ContactEvent::Submit);
        assert_eq!(state.status, SubmissionStatus::Sending);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_invalid_resubmit_keeps_error_status() {
        let state = reduce(ContactState::with_form(filled()), ContactEvent::Submit);
        let state = reduce(state, ContactEvent::Failed("boom".to_string()));
        let state = reduce(state, ContactEvent::Edit(Field::Message, String::new()));
        let state = reduce(state, ContactEvent::Submit);
        assert_eq!(state.status, SubmissionStatus::Error);
        assert_eq!(state.errors.get(Field::Message), Some("Message is required"));
    }

    #[test]
    fn test_stray_results_ignored_when_not_sending() {
        let idle = ContactState::with_form(filled());
        assert_eq!(reduce(idle.clone(), ContactEvent::Delivered), idle);
        assert_eq!(reduce(idle.clone(), ContactEvent::Failed("x".into())), idle);
        assert_eq!(reduce(idle.clone(), ContactEvent::ResetElapsed), idle);
    }
}
