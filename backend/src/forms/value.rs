//! Cleaned, typed field values.
//!
//! The field pass turns raw strings and bytes into [`CleanedValue`]s collected
//! in a [`CleanedValues`] mapping. Read accessors serve cross-field
//! validators; consuming accessors serve the bind step.

use std::fmt;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use image::ImageFormat;
use indexmap::IndexMap;

use crate::domain::Password;
use crate::forms::errors::FormError;

/// A validated image upload: sniffed format plus the original bytes.
///
/// `Debug` prints the file name, format, and byte count, never the content.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub(crate) fn new(file_name: String, format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            format,
            bytes,
        }
    }

    /// Declared file name, kept for storage naming only.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Format detected from the content, independent of the file name.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw image content.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// A single cleaned value produced by the field pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanedValue {
    /// Trimmed text.
    Text(String),
    /// Parsed email address.
    Email(EmailAddress),
    /// Password material, exactly as submitted.
    Password(Password),
    /// Checkbox state.
    Bool(bool),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Whole number.
    Integer(i64),
    /// Token selected from a choice set.
    Choice(String),
    /// Hidden identifier token.
    Token(String),
    /// Validated image upload.
    Image(ImageUpload),
}

/// Insertion-ordered mapping of field name to cleaned value.
///
/// Read accessors return `None` when the field is absent or holds a different
/// kind; `require_*` accessors consume the value and treat absence as an
/// internal error, because bind only runs after a fully clean pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CleanedValues(IndexMap<&'static str, CleanedValue>);

fn binding_gap(name: &str) -> FormError {
    FormError::internal(format!("no cleaned value to bind for field {name}"))
}

impl CleanedValues {
    pub(crate) fn insert(&mut self, name: &'static str, value: CleanedValue) {
        self.0.insert(name, value);
    }

    /// Number of cleaned values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field produced a cleaned value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` produced a cleaned value.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Cleaned value for `name`, whatever its kind.
    pub fn get(&self, name: &str) -> Option<&CleanedValue> {
        self.0.get(name)
    }

    /// Iterate cleaned values in field-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CleanedValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    /// Trimmed text value of `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(CleanedValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Parsed email value of `name`.
    pub fn email(&self, name: &str) -> Option<&EmailAddress> {
        match self.0.get(name) {
            Some(CleanedValue::Email(value)) => Some(value),
            _ => None,
        }
    }

    /// Password value of `name`.
    pub fn password(&self, name: &str) -> Option<&Password> {
        match self.0.get(name) {
            Some(CleanedValue::Password(value)) => Some(value),
            _ => None,
        }
    }

    /// Checkbox state of `name`.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(CleanedValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Timestamp value of `name`.
    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.0.get(name) {
            Some(CleanedValue::DateTime(value)) => Some(*value),
            _ => None,
        }
    }

    /// Integer value of `name`.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(CleanedValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Selected choice token of `name`.
    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(CleanedValue::Choice(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Hidden token value of `name`.
    pub fn token(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(CleanedValue::Token(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Image value of `name`.
    pub fn image(&self, name: &str) -> Option<&ImageUpload> {
        match self.0.get(name) {
            Some(CleanedValue::Image(value)) => Some(value),
            _ => None,
        }
    }

    /// Take the text value of an optional field.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Take the timestamp value of an optional field.
    pub fn take_datetime(&mut self, name: &str) -> Option<DateTime<Utc>> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::DateTime(value)) => Some(value),
            _ => None,
        }
    }

    /// Take the integer value of an optional field.
    pub fn take_integer(&mut self, name: &str) -> Option<i64> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Integer(value)) => Some(value),
            _ => None,
        }
    }

    /// Take the password value of an optional field.
    pub fn take_password(&mut self, name: &str) -> Option<Password> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Password(value)) => Some(value),
            _ => None,
        }
    }

    /// Take the text value of a required field.
    pub fn require_text(&mut self, name: &str) -> Result<String, FormError> {
        self.take_text(name).ok_or_else(|| binding_gap(name))
    }

    /// Take the email value of a required field.
    pub fn require_email(&mut self, name: &str) -> Result<EmailAddress, FormError> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Email(value)) => Ok(value),
            _ => Err(binding_gap(name)),
        }
    }

    /// Take the password value of a required field.
    pub fn require_password(&mut self, name: &str) -> Result<Password, FormError> {
        self.take_password(name).ok_or_else(|| binding_gap(name))
    }

    /// Take the checkbox state of a boolean field.
    pub fn require_boolean(&mut self, name: &str) -> Result<bool, FormError> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Bool(value)) => Ok(value),
            _ => Err(binding_gap(name)),
        }
    }

    /// Take the selected token of a required choice field.
    pub fn require_choice(&mut self, name: &str) -> Result<String, FormError> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Choice(value)) => Ok(value),
            _ => Err(binding_gap(name)),
        }
    }

    /// Take the token of a required hidden field.
    pub fn require_token(&mut self, name: &str) -> Result<String, FormError> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Token(value)) => Ok(value),
            _ => Err(binding_gap(name)),
        }
    }

    /// Take the image of a required image field.
    pub fn require_image(&mut self, name: &str) -> Result<ImageUpload, FormError> {
        match self.0.shift_remove(name) {
            Some(CleanedValue::Image(value)) => Ok(value),
            _ => Err(binding_gap(name)),
        }
    }
}
