//! Domain primitives for the validation layer.
//!
//! Purpose: strongly typed values that cleaned form input binds to, plus the
//! ports through which cross-field validators reach external collaborators.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`AccountId`] / [`OrganizationId`]: UUID-backed identifier newtypes.
//! - [`Password`]: zeroized, redacted password material.
//! - [`ports`]: credential verifier and administrator directory traits.

pub mod identifiers;
pub mod password;
pub mod ports;

pub use self::identifiers::{AccountId, IdentifierError, OrganizationId};
pub use self::password::Password;
