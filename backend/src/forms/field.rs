//! Field declarations and the per-field cleaning pass.
//!
//! A form is an ordered list of [`FieldSpec`]s. Each spec normalises and
//! validates its own value from a submission, independently of its siblings:
//! a failure yields that field's messages and evaluation moves on, so one bad
//! field never hides problems in another.
//!
//! Normalisation rules:
//! - textual kinds are trimmed; an all-whitespace value counts as missing;
//! - passwords are never trimmed; only the empty string counts as missing;
//! - booleans follow HTML checkbox semantics (absent, empty, `0`, `false`,
//!   `off` read as unticked);
//! - an optional field that is missing yields neither a value nor an error,
//!   except booleans, which always yield their state.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use email_address::EmailAddress;

use crate::domain::Password;
use crate::forms::config::UploadPolicy;
use crate::forms::submission::Submission;
use crate::forms::value::{CleanedValue, ImageUpload};

pub(crate) const REQUIRED_MESSAGE: &str = "this field is required";

/// A selectable option offered by a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    value: String,
    label: String,
}

impl ChoiceOption {
    /// Build an option from its submitted token and display label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Token a submission must carry to select this option.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Label shown to the user.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Primitive kind of a declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Text validated as an email address.
    Email,
    /// Password material.
    Password,
    /// HTML checkbox.
    Boolean,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    DateTime,
    /// Whole number.
    Integer,
    /// Hidden identifier token.
    Hidden,
    /// One token out of a declared option set.
    Choice {
        /// Options the value is checked against.
        options: Vec<ChoiceOption>,
    },
    /// Uploaded image checked against an upload policy.
    Image {
        /// Size and format constraints for the upload.
        policy: UploadPolicy,
    },
}

/// Declaration of a single named field.
///
/// Constructors produce required fields; chain [`FieldSpec::optional`] and
/// [`FieldSpec::max_length`] to adjust constraints.
///
/// # Examples
/// ```
/// use backend::forms::{FieldSpec, Submission};
///
/// let field = FieldSpec::text("title").max_length(150);
/// let submission = Submission::new().with_field("title", "  Beach cleanup  ");
/// let cleaned = field.clean(&submission).unwrap();
/// assert!(cleaned.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    max_length: Option<usize>,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            max_length: None,
        }
    }

    /// Required text field.
    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Required email field.
    pub fn email(name: &'static str) -> Self {
        Self::new(name, FieldKind::Email)
    }

    /// Required password field.
    pub fn password(name: &'static str) -> Self {
        Self::new(name, FieldKind::Password)
    }

    /// Required checkbox field; required means the box must be ticked.
    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Required datetime field.
    pub fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Required integer field.
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Required hidden token field.
    pub fn hidden(name: &'static str) -> Self {
        Self::new(name, FieldKind::Hidden)
    }

    /// Required choice field over `options`.
    pub fn choice(name: &'static str, options: Vec<ChoiceOption>) -> Self {
        Self::new(name, FieldKind::Choice { options })
    }

    /// Required image field governed by `policy`.
    pub fn image(name: &'static str, policy: UploadPolicy) -> Self {
        Self::new(name, FieldKind::Image { policy })
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Cap the length of the normalised value, counted in characters.
    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }

    /// Field name used in submissions and error keys.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether a value must be supplied.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Normalise and validate this field's value within `submission`.
    ///
    /// `Ok(None)` means an optional field was absent. Messages come back in
    /// the order the checks run.
    pub fn clean(&self, submission: &Submission) -> Result<Option<CleanedValue>, Vec<String>> {
        match &self.kind {
            FieldKind::Password => self.clean_password(submission),
            FieldKind::Boolean => self.clean_boolean(submission),
            FieldKind::Image { policy } => self.clean_image(submission, policy),
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::DateTime
            | FieldKind::Integer
            | FieldKind::Hidden
            | FieldKind::Choice { .. } => self.clean_textual(submission),
        }
    }

    fn clean_textual(&self, submission: &Submission) -> Result<Option<CleanedValue>, Vec<String>> {
        let Some(raw) = normalized(submission.field(self.name)) else {
            return self.when_missing();
        };

        let mut messages = Vec::new();
        self.check_length(raw, &mut messages);
        let value = self.parse_textual(raw, &mut messages);
        if messages.is_empty() {
            Ok(value)
        } else {
            Err(messages)
        }
    }

    fn parse_textual(&self, raw: &str, messages: &mut Vec<String>) -> Option<CleanedValue> {
        match &self.kind {
            FieldKind::Email => match raw.parse::<EmailAddress>() {
                Ok(parsed) => Some(CleanedValue::Email(parsed)),
                Err(_) => {
                    messages.push("enter a valid email address".to_owned());
                    None
                }
            },
            FieldKind::DateTime => match parse_datetime(raw) {
                Some(timestamp) => Some(CleanedValue::DateTime(timestamp)),
                None => {
                    messages.push(
                        "enter an RFC 3339 timestamp or a YYYY-MM-DD date".to_owned(),
                    );
                    None
                }
            },
            FieldKind::Integer => match raw.parse::<i64>() {
                Ok(number) => Some(CleanedValue::Integer(number)),
                Err(_) => {
                    messages.push("enter a whole number".to_owned());
                    None
                }
            },
            FieldKind::Choice { options } => {
                if options.iter().any(|option| option.value() == raw) {
                    Some(CleanedValue::Choice(raw.to_owned()))
                } else {
                    messages.push("select a valid choice".to_owned());
                    None
                }
            }
            FieldKind::Hidden => Some(CleanedValue::Token(raw.to_owned())),
            _ => Some(CleanedValue::Text(raw.to_owned())),
        }
    }

    fn clean_password(&self, submission: &Submission) -> Result<Option<CleanedValue>, Vec<String>> {
        let raw = submission.field(self.name).unwrap_or("");
        if raw.is_empty() {
            return self.when_missing();
        }

        let mut messages = Vec::new();
        self.check_length(raw, &mut messages);
        if messages.is_empty() {
            Ok(Some(CleanedValue::Password(Password::new(raw))))
        } else {
            Err(messages)
        }
    }

    fn clean_boolean(&self, submission: &Submission) -> Result<Option<CleanedValue>, Vec<String>> {
        let state = checkbox_state(submission.field(self.name));
        if self.required && !state {
            return Err(vec![REQUIRED_MESSAGE.to_owned()]);
        }
        Ok(Some(CleanedValue::Bool(state)))
    }

    fn clean_image(
        &self,
        submission: &Submission,
        policy: &UploadPolicy,
    ) -> Result<Option<CleanedValue>, Vec<String>> {
        let Some(upload) = submission.file(self.name) else {
            return self.when_missing();
        };

        if upload.bytes().is_empty() {
            return Err(vec!["the submitted file is empty".to_owned()]);
        }
        if upload.bytes().len() > policy.max_bytes() {
            return Err(vec![format!(
                "the file exceeds the {} byte upload limit",
                policy.max_bytes()
            )]);
        }

        let Ok(format) = image::guess_format(upload.bytes()) else {
            return Err(vec!["upload a valid image".to_owned()]);
        };
        if !policy.allows(format) {
            return Err(vec![format!(
                "this image format is not accepted (accepted: {})",
                policy.allowed_names()
            )]);
        }

        Ok(Some(CleanedValue::Image(ImageUpload::new(
            upload.file_name().to_owned(),
            format,
            upload.bytes().to_vec(),
        ))))
    }

    fn when_missing(&self) -> Result<Option<CleanedValue>, Vec<String>> {
        if self.required {
            Err(vec![REQUIRED_MESSAGE.to_owned()])
        } else {
            Ok(None)
        }
    }

    fn check_length(&self, raw: &str, messages: &mut Vec<String>) {
        let Some(limit) = self.max_length else {
            return;
        };
        let length = raw.chars().count();
        if length > limit {
            messages.push(format!(
                "ensure this value has at most {limit} characters (it has {length})"
            ));
        }
    }
}

fn normalized(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn checkbox_state(raw: Option<&str>) -> bool {
    let Some(value) = raw.map(str::trim) else {
        return false;
    };
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off"))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
