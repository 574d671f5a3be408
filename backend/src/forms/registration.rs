//! Volunteer registration.

use email_address::EmailAddress;

use crate::domain::Password;
use crate::forms::errors::FormError;
use crate::forms::field::FieldSpec;
use crate::forms::form::{Form, FormSchema};
use crate::forms::value::CleanedValues;

/// Validated registration data for a new volunteer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    password: Password,
    terms_accepted: bool,
}

impl Registration {
    /// Address the account will be created under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password, exactly as submitted.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Whether the terms checkbox was ticked. Always `true` for a bound
    /// registration; the field is required.
    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }
}

/// Sign-up form for new volunteers.
///
/// # Examples
/// ```
/// use backend::forms::{Form, RegistrationForm, Submission};
///
/// let submission = Submission::new()
///     .with_field("email", "ada@example.org")
///     .with_field("password", "s3cret pass")
///     .with_field("terms_acceptance", "on");
///
/// let registration = RegistrationForm.validate(&submission)?;
/// assert_eq!(registration.email().to_string(), "ada@example.org");
/// assert!(registration.terms_accepted());
/// # Ok::<(), backend::forms::FormError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationForm;

impl Form for RegistrationForm {
    type Output = Registration;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![
            FieldSpec::email("email"),
            FieldSpec::password("password"),
            FieldSpec::boolean("terms_acceptance"),
        ]))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        Ok(Registration {
            email: cleaned.require_email("email")?,
            password: cleaned.require_password("password")?,
            terms_accepted: cleaned.require_boolean("terms_acceptance")?,
        })
    }
}
