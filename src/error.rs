//! Errors reported to users of a [`Session`](crate::Session).
//!
//! The tree itself never fails: duplicates and missing values come back from
//! [`AvlTreeSet`](crate::AvlTreeSet) as plain `bool`/`Option` results. These variants are
//! how the session layer turns those outcomes, and bad input, into messages.

/// Result type for session and parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Insert of a value that is already present.
    #[error("value {value} already exists")]
    DuplicateKey {
        /// The rejected value
        value: String,
    },
    /// Search or removal of a value that is not present.
    #[error("value {value} not found")]
    NotFound {
        /// The missing value
        value: String,
    },
    /// An entry that could not be parsed as a value.
    #[error("invalid value {token:?} at entry {position}")]
    MalformedInput {
        /// 1-based position among the non-empty entries
        position: usize,
        /// The offending entry, trimmed
        token: String,
    },
    /// A population list without any entries.
    #[error("list is empty")]
    EmptyList,
}

impl Error {
    pub(crate) fn duplicate_key(value: &impl std::fmt::Display) -> Self {
        Self::DuplicateKey {
            value: value.to_string(),
        }
    }

    pub(crate) fn not_found(value: &impl std::fmt::Display) -> Self {
        Self::NotFound {
            value: value.to_string(),
        }
    }
}
