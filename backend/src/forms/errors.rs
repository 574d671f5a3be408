//! Validation failure channels.
//!
//! Expected bad input never raises a fault: it accumulates messages in a
//! [`FieldErrors`] bag which the validation driver wraps in
//! [`FormError::Rejected`]. The remaining [`FormError`] variants carry
//! collaborator failures that the submission's author cannot correct.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::domain::ports::{AdministratorDirectoryError, CredentialVerifierError};

/// Key under which form-level messages are recorded.
///
/// Form-level messages describe a relationship between fields (for example
/// "the new password and its confirmation differ") rather than a single
/// field's value.
pub const FORM_WIDE_KEY: &str = "form";

/// Ordered mapping of error key to human-readable messages.
///
/// Keys are field names, or [`FORM_WIDE_KEY`] for relationship errors. Keys
/// iterate in the order they were first recorded; messages under one key keep
/// insertion order.
///
/// # Examples
/// ```
/// use backend::forms::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add_field("email", "enter a valid email address");
/// errors.add_form("the new password and its confirmation differ");
///
/// assert_eq!(errors.message_count(), 2);
/// assert_eq!(errors.field_messages("email").len(), 1);
/// assert_eq!(errors.form_messages().len(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record a form-level message.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.add_field(FORM_WIDE_KEY, message);
    }

    pub(crate) fn extend_field(&mut self, field: &str, messages: Vec<String>) {
        self.0.entry(field.to_owned()).or_default().extend(messages);
    }

    /// Whether no message has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of recorded messages across all keys.
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Messages recorded against `field`, empty when the field is clean.
    pub fn field_messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Form-level messages.
    pub fn form_messages(&self) -> &[String] {
        self.field_messages(FORM_WIDE_KEY)
    }

    /// Iterate keys and their messages in first-recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Render the bag as a JSON object of message arrays.
    ///
    /// Key order follows first-recorded order; building the object directly
    /// keeps this conversion infallible.
    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        for (field, messages) in &self.0 {
            let list = messages.iter().cloned().map(Value::String).collect();
            object.insert(field.clone(), Value::Array(list));
        }
        Value::Object(object)
    }
}

/// Failure channel for a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The submission failed validation.
    #[error("submission rejected with {} validation message(s)", .0.message_count())]
    Rejected(FieldErrors),
    /// The administrator directory could not be consulted.
    #[error(transparent)]
    Directory(#[from] AdministratorDirectoryError),
    /// The credential store could not be consulted.
    #[error(transparent)]
    Credentials(#[from] CredentialVerifierError),
    /// The validation layer reached an inconsistent state.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl FormError {
    /// Helper for internal inconsistencies.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Field errors carried by a rejected submission.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}
