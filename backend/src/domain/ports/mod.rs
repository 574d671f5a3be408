//! Domain ports for the validation layer's external collaborators.
//!
//! Cross-field validators reach outside the submission in exactly two places:
//! checking a current password and listing administrator recipients. Both are
//! modelled as ports so host applications supply real adapters while tests
//! substitute mocks or fixtures.

mod administrator_directory;
mod credential_verifier;

#[cfg(test)]
pub use administrator_directory::MockAdministratorDirectory;
pub use administrator_directory::{
    Administrator, AdministratorDirectory, AdministratorDirectoryError, AdministratorEntryError,
    FixtureAdministratorDirectory,
};
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{
    CredentialVerifier, CredentialVerifierError, FixtureCredentialVerifier,
};
