//! Form validation and data binding for a volunteer-coordination backend.
//!
//! Raw HTTP submissions (field strings plus uploaded files) are cleaned,
//! cross-validated, and bound to typed values: registrations, profile
//! updates, offer drafts, image uploads, and routed contact messages.
//! Failures surface as per-field message lists, ready for the HTTP error
//! envelope in [`api`].
//!
//! # Examples
//! ```
//! use backend::forms::{Form, RegistrationForm, Submission};
//!
//! let submission = Submission::new()
//!     .with_field("email", "ada@example.org")
//!     .with_field("password", "s3cret pass")
//!     .with_field("terms_acceptance", "on");
//!
//! let registration = RegistrationForm.validate(&submission)?;
//! assert_eq!(registration.email().to_string(), "ada@example.org");
//! # Ok::<(), backend::forms::FormError>(())
//! ```

pub mod api;
pub mod domain;
pub mod forms;

pub use forms::{Form, Submission};
