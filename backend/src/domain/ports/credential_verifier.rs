//! Port for verifying an account's current password.
//!
//! Profile edits that change a password must prove knowledge of the current
//! one. The comparison runs against whatever credential store the host
//! application wires in; the validator only needs a yes/no answer.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::AccountId;

/// Errors surfaced by credential verifier adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialVerifierError {
    /// No credential is stored for the account.
    #[error("no credential found for account {account}")]
    UnknownAccount { account: String },
    /// The credential store is unreachable or failing.
    #[error("credential store unavailable: {message}")]
    Unavailable { message: String },
}

impl CredentialVerifierError {
    /// Helper for unknown-account failures.
    pub fn unknown_account(account: impl Into<String>) -> Self {
        Self::UnknownAccount {
            account: account.into(),
        }
    }

    /// Helper for store outages.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port answering whether a candidate password matches the stored credential
/// of an account.
///
/// Validation runs synchronously inside a single request, so the port is a
/// plain trait; adapters that sit on async infrastructure block on their own
/// runtime handle.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Compare `candidate` against the stored credential of `account`.
    fn verify_password(
        &self,
        account: &AccountId,
        candidate: &str,
    ) -> Result<bool, CredentialVerifierError>;
}

/// Fixture verifier backed by an in-memory credential table.
///
/// Accounts absent from the table produce
/// [`CredentialVerifierError::UnknownAccount`]. Use it in tests and demos
/// where real credential storage is out of scope.
#[derive(Debug, Default, Clone)]
pub struct FixtureCredentialVerifier {
    credentials: HashMap<AccountId, String>,
}

impl FixtureCredentialVerifier {
    /// Register a known credential for an account.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AccountId;
    /// use backend::domain::ports::FixtureCredentialVerifier;
    ///
    /// let account = AccountId::random();
    /// let verifier =
    ///     FixtureCredentialVerifier::default().with_credential(account, "s3cret");
    /// ```
    pub fn with_credential(mut self, account: AccountId, password: impl Into<String>) -> Self {
        self.credentials.insert(account, password.into());
        self
    }
}

impl CredentialVerifier for FixtureCredentialVerifier {
    fn verify_password(
        &self,
        account: &AccountId,
        candidate: &str,
    ) -> Result<bool, CredentialVerifierError> {
        self.credentials
            .get(account)
            .map(|stored| stored == candidate)
            .ok_or_else(|| CredentialVerifierError::unknown_account(account.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("s3cret", true)]
    #[case("wrong", false)]
    #[case("", false)]
    fn fixture_compares_against_registered_credential(
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let account = AccountId::random();
        let verifier =
            FixtureCredentialVerifier::default().with_credential(account.clone(), "s3cret");

        let matched = verifier
            .verify_password(&account, candidate)
            .expect("known account should verify");
        assert_eq!(matched, expected);
    }

    #[rstest]
    fn fixture_reports_unknown_accounts() {
        let verifier = FixtureCredentialVerifier::default();
        let account = AccountId::random();

        let err = verifier
            .verify_password(&account, "anything")
            .expect_err("unknown account must fail");
        assert_eq!(
            err,
            CredentialVerifierError::unknown_account(account.as_ref())
        );
    }

    #[rstest]
    fn unavailable_error_formats_message() {
        let err = CredentialVerifierError::unavailable("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
