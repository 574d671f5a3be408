//! Identifier newtypes carried by hidden form fields.
//!
//! Hidden fields round-trip record identifiers through the browser, so their
//! values arrive as untrusted strings. Each identifier validates as a UUID on
//! construction and keeps the original text for display and serialisation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when parsing an identifier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Token was missing or blank.
    Empty,
    /// Token was present but is not a valid UUID.
    Malformed,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Malformed => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdentifierError {}

macro_rules! uuid_identifier {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid, String);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(token: impl AsRef<str>) -> Result<Self, IdentifierError> {
                Self::from_owned(token.as_ref().to_owned())
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                let uuid = Uuid::new_v4();
                Self(uuid, uuid.to_string())
            }

            fn from_owned(token: String) -> Result<Self, IdentifierError> {
                if token.is_empty() {
                    return Err(IdentifierError::Empty);
                }
                if token.trim() != token {
                    return Err(IdentifierError::Malformed);
                }

                let parsed = Uuid::parse_str(&token).map_err(|_| IdentifierError::Malformed)?;
                Ok(Self(parsed, token))
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.1.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                let $name(_, raw) = value;
                raw
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

uuid_identifier! {
    /// Account targeted by a profile edit.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AccountId;
    ///
    /// let id = AccountId::new("123e4567-e89b-12d3-a456-426614174000").unwrap();
    /// assert_eq!(id.as_ref(), "123e4567-e89b-12d3-a456-426614174000");
    /// ```
    AccountId
}

uuid_identifier! {
    /// Organisation that owns an offer or receives a contact message.
    OrganizationId
}
