//! Error types for the few operations that are not remote calls.
//!
//! Remote failures are never errors in this crate's sense: they are
//! [`crate::Outcome::Failure`] values. The types here cover local concerns:
//! validating input before a call is issued and persisting cached state.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reasons a string is not an acceptable [`crate::Nickname`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    /// The nickname is empty.
    #[error("nickname must not be empty")]
    Empty,

    /// The nickname has more characters than allowed.
    #[error("nickname has {length} characters, at most {max} are allowed")]
    TooLong {
        /// Number of characters supplied.
        length: usize,
        /// Maximum number of characters accepted.
        max: usize,
    },
}

/// A server-assigned identifier was blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} must not be blank")]
pub struct BlankIdentifierError {
    /// Name of the identifier type.
    pub kind: &'static str,
}

// ---------------------------------------------------------------------------
// Local storage
// ---------------------------------------------------------------------------

/// Failure reading or writing a [`crate::LocalStore`] slot.
///
/// Repositories treat read failures as "nothing cached" and turn write
/// failures into [`crate::STORAGE_FAILURE_CODE`] outcomes; these errors never
/// reach a use-case.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read, written, or renamed.
    #[error("storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes are not a valid encoding of the slot's value type.
    #[error("stored value could not be (de)serialised: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
