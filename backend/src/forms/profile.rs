//! Profile editing with an optional, all-or-nothing password change.

use std::sync::Arc;

use crate::domain::ports::CredentialVerifier;
use crate::domain::{AccountId, Password};
use crate::forms::errors::{FieldErrors, FormError};
use crate::forms::field::FieldSpec;
use crate::forms::form::{Form, FormSchema};
use crate::forms::value::CleanedValues;

const NAME_MAX: usize = 128;

const ACCOUNT_MALFORMED: &str = "enter a valid account identifier";
const CURRENT_PASSWORD_INCORRECT: &str = "the current password is incorrect";
const PASSWORDS_DIFFER: &str = "the new password and its confirmation differ";

/// A requested password change, carried only when all three password slots
/// were filled in and verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    new_password: Password,
}

impl PasswordChange {
    /// Replacement password, exactly as submitted.
    pub fn new_password(&self) -> &Password {
        &self.new_password
    }
}

/// Validated profile changes for an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    account: AccountId,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_no: Option<String>,
    password_change: Option<PasswordChange>,
}

impl ProfileUpdate {
    /// Account the update applies to.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// New first name, when submitted.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// New last name, when submitted.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// New phone number, when submitted.
    pub fn phone_no(&self) -> Option<&str> {
        self.phone_no.as_deref()
    }

    /// Verified password change, when one was requested.
    pub fn password_change(&self) -> Option<&PasswordChange> {
        self.password_change.as_ref()
    }
}

/// Profile edit form.
///
/// The three password slots form an all-or-nothing group: leaving any of
/// them blank skips the password change entirely. When all three are
/// filled, the current password is checked against the stored credential
/// first; confirmation matching is only checked once the current password
/// verifies.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::AccountId;
/// use backend::domain::ports::FixtureCredentialVerifier;
/// use backend::forms::{Form, ProfileForm, Submission};
///
/// let account = AccountId::random();
/// let verifier = FixtureCredentialVerifier::default();
/// let submission = Submission::new()
///     .with_field("first_name", "Ada")
///     .with_field("user", account.as_ref());
///
/// let update = ProfileForm::new(Arc::new(verifier)).validate(&submission)?;
/// assert_eq!(update.first_name(), Some("Ada"));
/// assert!(update.password_change().is_none());
/// # Ok::<(), backend::forms::FormError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProfileForm<V> {
    verifier: Arc<V>,
}

impl<V> ProfileForm<V> {
    /// Create the form with the credential verifier used for password
    /// changes.
    pub fn new(verifier: Arc<V>) -> Self {
        Self { verifier }
    }
}

impl<V> Form for ProfileForm<V>
where
    V: CredentialVerifier,
{
    type Output = ProfileUpdate;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![
            FieldSpec::text("first_name").optional().max_length(NAME_MAX),
            FieldSpec::text("last_name").optional().max_length(NAME_MAX),
            FieldSpec::text("phone_no").optional(),
            FieldSpec::password("current_password").optional(),
            FieldSpec::password("new_password").optional(),
            FieldSpec::password("confirm_new_password").optional(),
            FieldSpec::hidden("user"),
        ]))
    }

    fn cross_validate(
        &self,
        cleaned: &CleanedValues,
        errors: &mut FieldErrors,
    ) -> Result<(), FormError> {
        // Relationship checks only run once every field cleaned.
        if !errors.is_empty() {
            return Ok(());
        }
        let Some(token) = cleaned.token("user") else {
            return Ok(());
        };
        let Ok(account) = AccountId::new(token) else {
            errors.add_field("user", ACCOUNT_MALFORMED);
            return Ok(());
        };

        // Leaving any of the three slots blank skips the password change.
        let (Some(current), Some(new), Some(confirm)) = (
            cleaned.password("current_password"),
            cleaned.password("new_password"),
            cleaned.password("confirm_new_password"),
        ) else {
            return Ok(());
        };

        if !self
            .verifier
            .verify_password(&account, current.as_str())?
        {
            errors.add_form(CURRENT_PASSWORD_INCORRECT);
            return Ok(());
        }
        if new != confirm {
            errors.add_form(PASSWORDS_DIFFER);
        }
        Ok(())
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        let token = cleaned.require_token("user")?;
        let account = AccountId::new(&token).map_err(|err| {
            FormError::internal(format!("account token failed revalidation: {err}"))
        })?;
        let password_change = match (
            cleaned.take_password("current_password"),
            cleaned.take_password("new_password"),
            cleaned.take_password("confirm_new_password"),
        ) {
            (Some(_), Some(new_password), Some(_)) => Some(PasswordChange { new_password }),
            _ => None,
        };
        Ok(ProfileUpdate {
            account,
            first_name: cleaned.take_text("first_name"),
            last_name: cleaned.take_text("last_name"),
            phone_no: cleaned.take_text("phone_no"),
            password_change,
        })
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
