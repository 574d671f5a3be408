//! The form contract: schema resolution, cleaning, cross-field validation,
//! and binding.

use crate::forms::errors::{FieldErrors, FormError};
use crate::forms::field::FieldSpec;
use crate::forms::submission::Submission;
use crate::forms::value::CleanedValues;

/// Ordered field declarations for one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Build a schema from its ordered field declarations.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        self.fields.as_slice()
    }

    /// Run the per-field pass over `submission`.
    ///
    /// Every field cleans independently: a failure records messages under the
    /// field's name and evaluation continues with its siblings. Callers
    /// treat the submission as valid only when the error bag is empty.
    ///
    /// # Examples
    /// ```
    /// use backend::forms::{FieldSpec, FormSchema, Submission};
    ///
    /// let schema = FormSchema::new(vec![
    ///     FieldSpec::text("name"),
    ///     FieldSpec::email("email"),
    /// ]);
    /// let submission = Submission::new().with_field("email", "not-an-email");
    ///
    /// let (cleaned, errors) = schema.clean(&submission);
    /// assert!(cleaned.is_empty());
    /// assert_eq!(errors.field_messages("name").len(), 1);
    /// assert_eq!(errors.field_messages("email").len(), 1);
    /// ```
    pub fn clean(&self, submission: &Submission) -> (CleanedValues, FieldErrors) {
        let mut cleaned = CleanedValues::default();
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            match field.clean(submission) {
                Ok(Some(value)) => cleaned.insert(field.name(), value),
                Ok(None) => {}
                Err(messages) => errors.extend_field(field.name(), messages),
            }
        }
        (cleaned, errors)
    }
}

/// Contract implemented by every form.
///
/// The provided [`Form::validate`] driver sequences the passes:
///
/// 1. [`Form::schema`] resolves field declarations (fallible because choice
///    sets may come from a live lookup);
/// 2. the schema's per-field pass cleans each field independently;
/// 3. [`Form::cross_validate`] records relationship errors over the cleaned
///    mapping;
/// 4. [`Form::bind`] produces the typed output once no errors remain.
///
/// A submission is either fully clean and bound, or rejected with at least
/// one recorded message. Partial acceptance is impossible.
pub trait Form {
    /// Typed value produced by a fully valid submission.
    type Output;

    /// Resolve this form's field declarations.
    fn schema(&self) -> Result<FormSchema, FormError>;

    /// Record errors that span multiple fields.
    ///
    /// The default records nothing. Implementations may return early once a
    /// business rule fails; collaborator failures propagate via `Err`.
    fn cross_validate(
        &self,
        _cleaned: &CleanedValues,
        _errors: &mut FieldErrors,
    ) -> Result<(), FormError> {
        Ok(())
    }

    /// Bind the cleaned mapping to the typed output.
    ///
    /// Runs only after a pass that recorded no errors.
    fn bind(&self, cleaned: CleanedValues) -> Result<Self::Output, FormError>;

    /// Validate `submission` end to end.
    fn validate(&self, submission: &Submission) -> Result<Self::Output, FormError> {
        let schema = self.schema()?;
        let (cleaned, mut errors) = schema.clean(submission);
        self.cross_validate(&cleaned, &mut errors)?;
        if errors.is_empty() {
            self.bind(cleaned)
        } else {
            Err(FormError::Rejected(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::forms::value::CleanedValue;

    fn sample_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("name").max_length(10),
            FieldSpec::email("email"),
            FieldSpec::text("comments").optional(),
        ])
    }

    #[rstest]
    fn clean_collects_errors_for_every_failing_field() {
        let submission = Submission::new()
            .with_field("name", "a name that is far too long")
            .with_field("email", "not-an-email");

        let (cleaned, errors) = sample_schema().clean(&submission);
        assert!(cleaned.is_empty());
        assert_eq!(errors.message_count(), 2);

        let keys: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(keys, vec!["name", "email"]);
    }

    #[rstest]
    fn clean_keeps_valid_fields_alongside_failing_ones() {
        let submission = Submission::new()
            .with_field("name", "Ada")
            .with_field("email", "not-an-email");

        let (cleaned, errors) = sample_schema().clean(&submission);
        assert_eq!(cleaned.text("name"), Some("Ada"));
        assert!(!errors.is_empty());
        assert!(errors.field_messages("name").is_empty());
    }

    #[rstest]
    fn clean_round_trips_a_fully_valid_submission() {
        let submission = Submission::new()
            .with_field("name", "  Ada  ")
            .with_field("email", "ada@example.org")
            .with_field("comments", "see you there");

        let (cleaned, errors) = sample_schema().clean(&submission);
        assert!(errors.is_empty());
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned.text("name"), Some("Ada"));
        assert_eq!(
            cleaned.email("email").map(ToString::to_string),
            Some("ada@example.org".to_owned())
        );
        assert_eq!(cleaned.text("comments"), Some("see you there"));
    }

    struct NameForm;

    impl Form for NameForm {
        type Output = String;

        fn schema(&self) -> Result<FormSchema, FormError> {
            Ok(FormSchema::new(vec![FieldSpec::text("name")]))
        }

        fn cross_validate(
            &self,
            cleaned: &CleanedValues,
            errors: &mut FieldErrors,
        ) -> Result<(), FormError> {
            if cleaned.text("name") == Some("root") {
                errors.add_field("name", "this name is reserved");
            }
            Ok(())
        }

        fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
            cleaned.require_text("name")
        }
    }

    #[rstest]
    fn validate_binds_a_clean_submission() {
        let submission = Submission::new().with_field("name", "Ada");

        let name = NameForm.validate(&submission).expect("valid submission");
        assert_eq!(name, "Ada");
    }

    #[rstest]
    fn validate_rejects_on_field_errors() {
        let error = NameForm
            .validate(&Submission::new())
            .expect_err("missing field must reject");

        let bag = error.field_errors().expect("rejected carries the bag");
        assert_eq!(bag.field_messages("name"), ["this field is required"]);
    }

    #[rstest]
    fn validate_rejects_on_cross_field_errors() {
        let submission = Submission::new().with_field("name", "root");

        let error = NameForm
            .validate(&submission)
            .expect_err("reserved name must reject");

        let bag = error.field_errors().expect("rejected carries the bag");
        assert_eq!(bag.field_messages("name"), ["this name is reserved"]);
    }

    #[rstest]
    fn schema_preserves_declaration_order() {
        let schema = sample_schema();
        let names: Vec<&str> = schema.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["name", "email", "comments"]);
    }

    #[rstest]
    fn cleaned_values_follow_declaration_order() {
        let submission = Submission::new()
            .with_field("email", "ada@example.org")
            .with_field("name", "Ada");

        let (cleaned, _) = sample_schema().clean(&submission);
        let names: Vec<&str> = cleaned.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "email"]);
        assert!(matches!(
            cleaned.get("email"),
            Some(CleanedValue::Email(_))
        ));
    }
}
