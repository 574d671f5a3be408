//! Form validation and data binding for submitted request data.
//!
//! Each form declares an ordered field schema, cleans raw submission values
//! field by field, applies cross-field rules over the cleaned mapping, and
//! binds the result to a typed output. A submission is either fully clean
//! and bound, or rejected with per-field message lists; nothing in between.
//!
//! # Examples
//! ```
//! use backend::forms::{Form, FormError, RegistrationForm, Submission};
//!
//! let submission = Submission::new()
//!     .with_field("email", "not-an-email")
//!     .with_field("terms_acceptance", "on");
//!
//! match RegistrationForm.validate(&submission) {
//!     Err(FormError::Rejected(errors)) => {
//!         assert_eq!(errors.field_messages("email"), ["enter a valid email address"]);
//!         assert_eq!(errors.field_messages("password"), ["this field is required"]);
//!     }
//!     other => panic!("expected a rejection, got {other:?}"),
//! }
//! ```

pub mod config;
pub mod contact;
pub mod errors;
pub mod field;
pub mod form;
pub mod offer;
pub mod profile;
pub mod registration;
pub mod submission;
pub mod uploads;
pub mod value;

pub use self::config::{UploadPolicy, UploadSettings};
pub use self::contact::{
    AdministratorContactForm, AdministratorContactMessage, ApplicantKind, ContactForm,
    ContactMessage, OrganizationContactForm, OrganizationContactMessage, ParseApplicantKindError,
};
pub use self::errors::{FORM_WIDE_KEY, FieldErrors, FormError};
pub use self::field::{ChoiceOption, FieldKind, FieldSpec};
pub use self::form::{Form, FormSchema};
pub use self::offer::{OfferApplication, OfferApplicationForm, OfferDraft, OfferForm};
pub use self::profile::{PasswordChange, ProfileForm, ProfileUpdate};
pub use self::registration::{Registration, RegistrationForm};
pub use self::submission::{FileUpload, Submission};
pub use self::uploads::{GalleryImageForm, GalleryUpload, OfferImageForm, OfferImageUpload};
pub use self::value::{CleanedValue, CleanedValues, ImageUpload};
