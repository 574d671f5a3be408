//! Offer creation and offer applications.

use chrono::{DateTime, Utc};

use crate::domain::OrganizationId;
use crate::forms::errors::{FieldErrors, FormError};
use crate::forms::field::FieldSpec;
use crate::forms::form::{Form, FormSchema};
use crate::forms::value::CleanedValues;

const TITLE_MAX: usize = 150;
const APPLICATION_FIELD_MAX: usize = 80;

const ORGANIZATION_MALFORMED: &str = "enter a valid organization identifier";
const ACTION_DATES_MESSAGE: &str =
    "the action start date must not be later than the action end date";
const RECRUITMENT_DATES_MESSAGE: &str =
    "the recruitment start date must not be later than the recruitment end date";
const RESERVE_DATES_MESSAGE: &str =
    "the reserve recruitment start date must not be later than the reserve recruitment end date";

/// Validated draft of a volunteering offer.
///
/// The descriptive fields are required; scheduling is optional so drafts can
/// be saved before dates are settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDraft {
    /// Organization publishing the offer.
    pub organization: OrganizationId,
    /// What the work involves.
    pub description: String,
    /// What is expected of volunteers.
    pub requirements: String,
    /// Expected time commitment.
    pub time_commitment: String,
    /// What volunteers receive in return.
    pub benefits: String,
    /// Where the work happens.
    pub location: String,
    /// Offer headline.
    pub title: String,
    /// Human-readable duration of the offer.
    pub time_period: String,
    /// Legacy status value, kept for records that still carry one.
    pub status_old: Option<String>,
    /// When the action starts.
    pub started_at: Option<DateTime<Utc>>,
    /// When the action finishes.
    pub finished_at: Option<DateTime<Utc>>,
    /// When recruitment opens.
    pub recruitment_start_date: Option<DateTime<Utc>>,
    /// When recruitment closes.
    pub recruitment_end_date: Option<DateTime<Utc>>,
    /// Whether a reserve recruitment round runs.
    pub reserve_recruitment: bool,
    /// When reserve recruitment opens.
    pub reserve_recruitment_start_date: Option<DateTime<Utc>>,
    /// When reserve recruitment closes.
    pub reserve_recruitment_end_date: Option<DateTime<Utc>>,
    /// Whether the action is already running.
    pub action_ongoing: bool,
    /// Whether the cooperation is open-ended.
    pub constant_coop: bool,
    /// Scheduled action period start, kept alongside `started_at`.
    pub action_start_date: Option<DateTime<Utc>>,
    /// Scheduled action period end, kept alongside `finished_at`.
    pub action_end_date: Option<DateTime<Utc>>,
    /// Cap on accepted volunteers.
    pub volunteers_limit: Option<i64>,
    /// Cap on reserve-list volunteers.
    pub reserve_volunteers_limit: Option<i64>,
}

/// Offer creation form for organizations.
///
/// Three date pairs are ordering-checked independently: `started_at` and
/// `finished_at`, the recruitment pair, and the reserve recruitment pair.
/// A violation attaches the same message to both slots of the pair and
/// never suppresses checks on the other pairs. The `action_start_date` and
/// `action_end_date` fields bind without an ordering check.
///
/// # Examples
/// ```
/// use backend::domain::OrganizationId;
/// use backend::forms::{Form, OfferForm, Submission};
///
/// let organization = OrganizationId::random();
/// let submission = Submission::new()
///     .with_field("organization", organization.as_ref())
///     .with_field("description", "Help at the animal shelter")
///     .with_field("requirements", "Patience with animals")
///     .with_field("time_commitment", "Two afternoons a week")
///     .with_field("benefits", "Training provided")
///     .with_field("location", "Poznań")
///     .with_field("title", "Shelter assistant")
///     .with_field("time_period", "Spring 2026");
///
/// let draft = OfferForm.validate(&submission)?;
/// assert_eq!(draft.title, "Shelter assistant");
/// assert!(!draft.reserve_recruitment);
/// assert!(draft.started_at.is_none());
/// # Ok::<(), backend::forms::FormError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct OfferForm;

impl Form for OfferForm {
    type Output = OfferDraft;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![
            FieldSpec::hidden("organization"),
            FieldSpec::text("description"),
            FieldSpec::text("requirements"),
            FieldSpec::text("time_commitment"),
            FieldSpec::text("benefits"),
            FieldSpec::text("location"),
            FieldSpec::text("title").max_length(TITLE_MAX),
            FieldSpec::text("time_period"),
            FieldSpec::text("status_old").optional(),
            FieldSpec::datetime("started_at").optional(),
            FieldSpec::datetime("finished_at").optional(),
            FieldSpec::datetime("recruitment_start_date").optional(),
            FieldSpec::datetime("recruitment_end_date").optional(),
            FieldSpec::boolean("reserve_recruitment").optional(),
            FieldSpec::datetime("reserve_recruitment_start_date").optional(),
            FieldSpec::datetime("reserve_recruitment_end_date").optional(),
            FieldSpec::boolean("action_ongoing").optional(),
            FieldSpec::boolean("constant_coop").optional(),
            FieldSpec::datetime("action_start_date").optional(),
            FieldSpec::datetime("action_end_date").optional(),
            FieldSpec::integer("volunteers_limit").optional(),
            FieldSpec::integer("reserve_volunteers_limit").optional(),
        ]))
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
        check_date_pair(
            cleaned,
            errors,
            "started_at",
            "finished_at",
            ACTION_DATES_MESSAGE,
        );
        check_date_pair(
            cleaned,
            errors,
            "recruitment_start_date",
            "recruitment_end_date",
            RECRUITMENT_DATES_MESSAGE,
        );
        check_date_pair(
            cleaned,
            errors,
            "reserve_recruitment_start_date",
            "reserve_recruitment_end_date",
            RESERVE_DATES_MESSAGE,
        );
        Ok(())
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        let token = cleaned.require_token("organization")?;
        let organization = OrganizationId::new(&token).map_err(|err| {
            FormError::internal(format!("organization token failed revalidation: {err}"))
        })?;
        Ok(OfferDraft {
            organization,
            description: cleaned.require_text("description")?,
            requirements: cleaned.require_text("requirements")?,
            time_commitment: cleaned.require_text("time_commitment")?,
            benefits: cleaned.require_text("benefits")?,
            location: cleaned.require_text("location")?,
            title: cleaned.require_text("title")?,
            time_period: cleaned.require_text("time_period")?,
            status_old: cleaned.take_text("status_old"),
            started_at: cleaned.take_datetime("started_at"),
            finished_at: cleaned.take_datetime("finished_at"),
            recruitment_start_date: cleaned.take_datetime("recruitment_start_date"),
            recruitment_end_date: cleaned.take_datetime("recruitment_end_date"),
            reserve_recruitment: cleaned.require_boolean("reserve_recruitment")?,
            reserve_recruitment_start_date: cleaned
                .take_datetime("reserve_recruitment_start_date"),
            reserve_recruitment_end_date: cleaned.take_datetime("reserve_recruitment_end_date"),
            action_ongoing: cleaned.require_boolean("action_ongoing")?,
            constant_coop: cleaned.require_boolean("constant_coop")?,
            action_start_date: cleaned.take_datetime("action_start_date"),
            action_end_date: cleaned.take_datetime("action_end_date"),
            volunteers_limit: cleaned.take_integer("volunteers_limit"),
            reserve_volunteers_limit: cleaned.take_integer("reserve_volunteers_limit"),
        })
    }
}

/// Record `message` on both slots when a pair is present and inverted.
fn check_date_pair(
    cleaned: &CleanedValues,
    errors: &mut FieldErrors,
    start: &str,
    end: &str,
    message: &str,
) {
    let (Some(start_at), Some(end_at)) = (cleaned.datetime(start), cleaned.datetime(end)) else {
        return;
    };
    if start_at > end_at {
        errors.add_field(start, message);
        errors.add_field(end, message);
    }
}

/// Validated application to join an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferApplication {
    /// Address the applicant wants replies sent to.
    pub email: String,
    /// Contact phone number.
    pub phone_no: String,
    /// Applicant's full name.
    pub fullname: String,
    /// Free-form message to the organization.
    pub comments: Option<String>,
}

/// Application form volunteers submit to join an offer.
///
/// The address field is length-limited plain text; applications reach the
/// organization as free-form contact details, so no address parsing applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfferApplicationForm;

impl Form for OfferApplicationForm {
    type Output = OfferApplication;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![
            FieldSpec::text("email").max_length(APPLICATION_FIELD_MAX),
            FieldSpec::text("phone_no").max_length(APPLICATION_FIELD_MAX),
            FieldSpec::text("fullname").max_length(APPLICATION_FIELD_MAX),
            FieldSpec::text("comments").optional(),
        ]))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        Ok(OfferApplication {
            email: cleaned.require_text("email")?,
            phone_no: cleaned.require_text("phone_no")?,
            fullname: cleaned.require_text("fullname")?,
            comments: cleaned.take_text("comments"),
        })
    }
}

#[cfg(test)]
#[path = "offer_tests.rs"]
mod tests;
