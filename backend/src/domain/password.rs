//! Password material captured from form submissions.
//!
//! Raw password values never belong in logs or debug output. The wrapper here
//! keeps the bytes in [`Zeroizing`] storage so they are wiped on drop, and its
//! `Debug` implementation renders a redacted placeholder.

use zeroize::Zeroizing;

/// Raw password material from a submission.
///
/// ## Invariants
/// - The value is stored exactly as submitted: passwords are never trimmed,
///   because surrounding whitespace is part of the credential.
///
/// # Examples
/// ```
/// use backend::domain::Password;
///
/// let password = Password::new("correct horse battery staple");
/// assert_eq!(password.as_str(), "correct horse battery staple");
/// assert_eq!(format!("{password:?}"), "Password(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap raw password material.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Password string exactly as submitted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the captured value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
