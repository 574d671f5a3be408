//! Raw form submissions.
//!
//! A [`Submission`] mirrors one HTTP form post: urlencoded fields plus any
//! multipart file parts, both in arrival order. Values are untrusted strings
//! and bytes; the field pass normalises and validates them.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

/// An uploaded file attached to a submission.
///
/// The declared file name is untrusted metadata; content checks always run on
/// the bytes. `Debug` prints the name and byte count, never the content.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Capture an uploaded file part.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Declared file name, exactly as submitted.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Raw field and file values captured from one form post.
///
/// # Examples
/// ```
/// use backend::forms::Submission;
///
/// let submission = Submission::new()
///     .with_field("email", "volunteer@example.org")
///     .with_field("message", "I would like to help");
/// assert_eq!(submission.field("email"), Some("volunteer@example.org"));
/// assert_eq!(submission.field("missing"), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Submission {
    fields: IndexMap<String, String>,
    files: IndexMap<String, FileUpload>,
}

impl Submission {
    /// Create an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add or replace an uploaded file.
    pub fn with_file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    /// Raw value of a field, if the post carried it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Uploaded file for a field, if the post carried it.
    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        self.files.get(name)
    }
}

impl From<HashMap<String, String>> for Submission {
    fn from(fields: HashMap<String, String>) -> Self {
        fields.into_iter().collect()
    }
}

impl FromIterator<(String, String)> for Submission {
    /// Collect field pairs; on repeated names the last value wins, matching
    /// how browsers and urlencoded parsers resolve duplicate keys.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut submission = Self::new();
        for (name, value) in pairs {
            submission.fields.insert(name, value);
        }
        submission
    }
}
