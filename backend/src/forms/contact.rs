//! Contact forms and their routing variants.
//!
//! A shared contact field set (email, message, name, phone number) is
//! extended by composition: the organization variant adds a hidden
//! recipient identifier, the administrator variant adds applicant and
//! recipient selectors. There is no form hierarchy.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::OrganizationId;
use crate::domain::ports::AdministratorDirectory;
use crate::forms::errors::{FieldErrors, FormError};
use crate::forms::field::{ChoiceOption, FieldSpec};
use crate::forms::form::{Form, FormSchema};
use crate::forms::value::CleanedValues;

const CONTACT_FIELD_MAX: usize = 150;

const ORGANIZATION_MALFORMED: &str = "enter a valid organization identifier";

/// The field set shared by every contact variant.
fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("email").max_length(CONTACT_FIELD_MAX),
        FieldSpec::text("message"),
        FieldSpec::text("name").max_length(CONTACT_FIELD_MAX),
        FieldSpec::text("phone_no").max_length(CONTACT_FIELD_MAX),
    ]
}

fn bind_contact(cleaned: &mut CleanedValues) -> Result<ContactMessage, FormError> {
    Ok(ContactMessage {
        email: cleaned.require_text("email")?,
        message: cleaned.require_text("message")?,
        name: cleaned.require_text("name")?,
        phone_no: cleaned.require_text("phone_no")?,
    })
}

/// Validated message from the public contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender's reply address, as submitted.
    pub email: String,
    /// Body of the message.
    pub message: String,
    /// Sender's name.
    pub name: String,
    /// Sender's phone number.
    pub phone_no: String,
}

/// Public contact form.
///
/// # Examples
/// ```
/// use backend::forms::{ContactForm, Form, Submission};
///
/// let submission = Submission::new()
///     .with_field("email", "ada@example.org")
///     .with_field("message", "How do I join?")
///     .with_field("name", "Ada")
///     .with_field("phone_no", "555 0100");
///
/// let message = ContactForm.validate(&submission)?;
/// assert_eq!(message.name, "Ada");
/// # Ok::<(), backend::forms::FormError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactForm;

impl Form for ContactForm {
    type Output = ContactMessage;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(contact_fields()))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        bind_contact(&mut cleaned)
    }
}

/// Validated volunteer message to one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationContactMessage {
    /// The common contact payload.
    pub contact: ContactMessage,
    /// Organization receiving the message.
    pub organization: OrganizationId,
}

/// Contact form volunteers use to write to one organization.
///
/// Extends the shared contact fields with a hidden organization identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrganizationContactForm;

impl Form for OrganizationContactForm {
    type Output = OrganizationContactMessage;

    fn schema(&self) -> Result<FormSchema, FormError> {
        let mut fields = contact_fields();
        fields.push(FieldSpec::hidden("organization"));
        Ok(FormSchema::new(fields))
    }

    fn cross_validate(
        &self,
        cleaned: &CleanedValues,
        errors: &mut FieldErrors,
    ) -> Result<(), FormError> {
        if let Some(token) = cleaned.token("organization") {
            if OrganizationId::new(token).is_err() {
                errors.add_field("organization", ORGANIZATION_MALFORMED);
            }
        }
        Ok(())
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        let contact = bind_contact(&mut cleaned)?;
        let token = cleaned.require_token("organization")?;
        let organization = OrganizationId::new(&token).map_err(|err| {
            FormError::internal(format!("organization token failed revalidation: {err}"))
        })?;
        Ok(OrganizationContactMessage {
            contact,
            organization,
        })
    }
}

/// Raised when an applicant-kind token matches neither known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown applicant kind: {input}")]
pub struct ParseApplicantKindError {
    input: String,
}

/// Who is writing to the administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicantKind {
    /// A volunteer account.
    Volunteer,
    /// An organization account.
    Organization,
}

impl ApplicantKind {
    /// Wire token for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for ApplicantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicantKind {
    type Err = ParseApplicantKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "volunteer" => Ok(Self::Volunteer),
            "organization" => Ok(Self::Organization),
            _ => Err(ParseApplicantKindError {
                input: raw.to_owned(),
            }),
        }
    }
}

fn applicant_options() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(ApplicantKind::Volunteer.as_str(), "Volunteer"),
        ChoiceOption::new(ApplicantKind::Organization.as_str(), "Organization"),
    ]
}

/// Validated message to a chosen administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministratorContactMessage {
    /// The common contact payload.
    pub contact: ContactMessage,
    /// Which kind of account is writing in.
    pub applicant: ApplicantKind,
    /// Email address of the chosen administrator.
    pub administrator: String,
}

/// Contact form routed to a chosen administrator.
///
/// The recipient choice set comes from the directory at validation time.
/// Construction performs no lookup, so the form can exist while the
/// directory is unavailable; only `validate` observes the outage.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::{Administrator, FixtureAdministratorDirectory};
/// use backend::forms::{AdministratorContactForm, ApplicantKind, Form, Submission};
///
/// let directory = FixtureAdministratorDirectory::default()
///     .with_administrator(Administrator::new("On call", "oncall@example.org")?);
/// let form = AdministratorContactForm::new(Arc::new(directory));
///
/// let submission = Submission::new()
///     .with_field("email", "ada@example.org")
///     .with_field("message", "The sign-up page is down")
///     .with_field("name", "Ada")
///     .with_field("phone_no", "555 0100")
///     .with_field("applicant", "volunteer")
///     .with_field("administrator", "oncall@example.org");
///
/// let message = form.validate(&submission)?;
/// assert_eq!(message.applicant, ApplicantKind::Volunteer);
/// assert_eq!(message.administrator, "oncall@example.org");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct AdministratorContactForm<D> {
    directory: Arc<D>,
}

impl<D> AdministratorContactForm<D> {
    /// Create the form with the administrator directory it will consult.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> Form for AdministratorContactForm<D>
where
    D: AdministratorDirectory,
{
    type Output = AdministratorContactMessage;

    fn schema(&self) -> Result<FormSchema, FormError> {
        let recipients = self.directory.administrator_emails()?;
        let recipient_options = recipients
            .iter()
            .map(|admin| ChoiceOption::new(admin.email(), admin.label()))
            .collect();

        let mut fields = contact_fields();
        fields.push(FieldSpec::choice("applicant", applicant_options()));
        fields.push(FieldSpec::choice("administrator", recipient_options));
        Ok(FormSchema::new(fields))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        let contact = bind_contact(&mut cleaned)?;
        let applicant_token = cleaned.require_choice("applicant")?;
        let applicant = applicant_token.parse::<ApplicantKind>().map_err(|err| {
            FormError::internal(format!("applicant token failed revalidation: {err}"))
        })?;
        let administrator = cleaned.require_choice("administrator")?;
        Ok(AdministratorContactMessage {
            contact,
            applicant,
            administrator,
        })
    }
}

#[cfg(test)]
#[path = "contact_tests.rs"]
mod tests;
