//! Port resolving administrator recipients for contact routing.
//!
//! The administrator contact form offers a recipient choice whose options come
//! from a live directory lookup. The list changes as administrators come and
//! go, so it is fetched fresh for every validation pass and never cached at
//! form-definition scope.

use thiserror::Error;

/// Validation errors raised when constructing an [`Administrator`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdministratorEntryError {
    /// Display label was missing or blank once trimmed.
    #[error("administrator label must not be empty")]
    EmptyLabel,
    /// Email address was missing or blank once trimmed.
    #[error("administrator email must not be empty")]
    EmptyEmail,
}

/// A contact recipient resolved from the administrator directory.
///
/// ## Invariants
/// - `label` and `email` are trimmed and non-empty.
///
/// # Examples
/// ```
/// use backend::domain::ports::Administrator;
///
/// let admin = Administrator::new("Jo Admin", "jo@example.org").unwrap();
/// assert_eq!(admin.label(), "Jo Admin");
/// assert_eq!(admin.email(), "jo@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    label: String,
    email: String,
}

impl Administrator {
    /// Construct an entry from raw label/email inputs.
    pub fn new(
        label: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, AdministratorEntryError> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(AdministratorEntryError::EmptyLabel);
        }

        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(AdministratorEntryError::EmptyEmail);
        }

        Ok(Self {
            label: label.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Display label shown to the sender.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Email address the message is routed to.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Errors surfaced by administrator directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdministratorDirectoryError {
    /// The directory backend is unreachable or failing.
    #[error("administrator directory unavailable: {message}")]
    Unavailable { message: String },
}

impl AdministratorDirectoryError {
    /// Helper for directory outages.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port listing the administrators who can receive contact messages.
#[cfg_attr(test, mockall::automock)]
pub trait AdministratorDirectory: Send + Sync {
    /// Current administrator recipients, in directory order.
    fn administrator_emails(&self) -> Result<Vec<Administrator>, AdministratorDirectoryError>;
}

/// Fixture directory returning a fixed recipient list.
#[derive(Debug, Default, Clone)]
pub struct FixtureAdministratorDirectory {
    administrators: Vec<Administrator>,
}

impl FixtureAdministratorDirectory {
    /// Append a recipient to the fixture directory.
    pub fn with_administrator(mut self, administrator: Administrator) -> Self {
        self.administrators.push(administrator);
        self
    }
}

impl AdministratorDirectory for FixtureAdministratorDirectory {
    fn administrator_emails(&self) -> Result<Vec<Administrator>, AdministratorDirectoryError> {
        Ok(self.administrators.clone())
    }
}
