//! The module contains the errors the ledger core can return.
//!
//! Every error is detected synchronously, before any network call:
//!
//! - [`NoBook`] no book context is selected.
//! - [`MissingAccount`] a required account role is still unset.
//! - [`InvalidAmount`] an amount is missing, zero, negative or unparsable.
//! - [`Unbalanced`] debit and credit sums differ; both sums are carried.
//! - [`MinimumEntries`] an advanced transaction would drop below two entries.
//!
//!  [`NoBook`]: LedgerError::NoBook
//!  [`MissingAccount`]: LedgerError::MissingAccount
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`Unbalanced`]: LedgerError::Unbalanced
//!  [`MinimumEntries`]: LedgerError::MinimumEntries
use thiserror::Error;

use crate::{AccountId, AccountRole, Money};

/// Ledger custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no book selected")]
    NoBook,
    #[error("missing {0} account")]
    MissingAccount(AccountRole),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("debit {debit} ≠ credit {credit}")]
    Unbalanced { debit: Money, credit: Money },
    #[error("at least 2 entries are required")]
    MinimumEntries,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unknown account type: {0}")]
    UnknownAccountType(String),
    #[error("account \"{account}\" cannot be used as {role} account")]
    IneligibleAccount { role: AccountRole, account: AccountId },
    #[error("account hierarchy has a cycle through \"{0}\"")]
    CycleDetected(AccountId),
    #[error("account directory failed: {0}")]
    Directory(String),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("{0}")]
    Submission(String),
}

/// Field-less category of a [`LedgerError`], for callers that only switch on
/// the kind of failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoBook,
    MissingAccount,
    InvalidAmount,
    Unbalanced,
    MinimumEntries,
    InvalidDate,
    UnknownAccountType,
    IneligibleAccount,
    CycleDetected,
    Directory,
    SubmissionInFlight,
    Submission,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoBook => ErrorKind::NoBook,
            Self::MissingAccount(_) => ErrorKind::MissingAccount,
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::Unbalanced { .. } => ErrorKind::Unbalanced,
            Self::MinimumEntries => ErrorKind::MinimumEntries,
            Self::InvalidDate(_) => ErrorKind::InvalidDate,
            Self::UnknownAccountType(_) => ErrorKind::UnknownAccountType,
            Self::IneligibleAccount { .. } => ErrorKind::IneligibleAccount,
            Self::CycleDetected(_) => ErrorKind::CycleDetected,
            Self::Directory(_) => ErrorKind::Directory,
            Self::SubmissionInFlight => ErrorKind::SubmissionInFlight,
            Self::Submission(_) => ErrorKind::Submission,
        }
    }

    /// Whether the error stems from the draft's content (as opposed to the
    /// session or the remote collaborators) and is fixed by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoBook
                | ErrorKind::MissingAccount
                | ErrorKind::InvalidAmount
                | ErrorKind::Unbalanced
                | ErrorKind::MinimumEntries
                | ErrorKind::InvalidDate
                | ErrorKind::IneligibleAccount
        )
    }
}
