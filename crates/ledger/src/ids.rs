//! Identifiers of remote entities.
//!
//! The service hands ids out either as JSON numbers or as strings (large values
//! are stringified upstream so they survive lossy number parsing). Callers
//! normalize both forms into one of the string-backed newtypes below as soon as
//! the value enters the crate, so comparisons never mix representations.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from its textual form; surrounding whitespace is dropped.
            pub fn new(value: impl Into<String>) -> Self {
                let value = value.into();
                match value.trim() {
                    trimmed if trimmed.len() == value.len() => Self(value),
                    trimmed => Self(trimmed.to_string()),
                }
            }

            /// Like [`new`](Self::new), but a blank value means "nothing selected".
            pub fn parse(value: &str) -> Option<Self> {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Numeric form, when the id is a plain integer.
            pub fn as_i64(&self) -> Option<i64> {
                self.0.parse().ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Ledger account id.
    AccountId
);
string_id!(
    /// Book (ledger) id. Every transaction belongs to exactly one book.
    BookId
);
string_id!(
    /// Tag id. Tags are passed through to the service unvalidated.
    TagId
);
