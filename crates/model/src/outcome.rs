//! The closed result type shared by every layer of the client.
//!
//! [`Outcome`] is what a remote call (or anything derived from one) evaluates
//! to. It has exactly three shapes and callers are expected to `match` on all
//! of them:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`Outcome::Success`] | the call succeeded and produced a payload |
//! | [`Outcome::Empty`] | the call succeeded but there is nothing meaningful to return |
//! | [`Outcome::Failure`] | the call failed; carries a message and a status or sentinel code |
//!
//! Transport errors never travel above the response adapter in the `network`
//! crate; from there upward a failure is always an [`Outcome::Failure`].

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Failure codes
// ---------------------------------------------------------------------------

/// Code used when no server-assigned status exists: the host was unreachable,
/// the request timed out, or a success body could not be decoded.
///
/// Never a valid HTTP status.
pub const TRANSPORT_FAILURE_CODE: i32 = -1;

/// Code used when a value could not be written to a local store.
pub const STORAGE_FAILURE_CODE: i32 = -2;

/// Code used for input rejected on the client before any call was issued.
///
/// Matches the server's "malformed input" status so callers need one path.
pub const INVALID_INPUT_CODE: i32 = 400;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a remote or derived operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The operation produced a value.
    Success(T),
    /// The operation succeeded without a meaningful payload (e.g. HTTP 204).
    Empty,
    /// The operation failed.
    Failure {
        /// Human-readable failure description.
        message: String,
        /// HTTP status when the server answered, otherwise a sentinel such as
        /// [`TRANSPORT_FAILURE_CODE`].
        code: i32,
    },
}

impl<T> Outcome<T> {
    /// Builds a [`Outcome::Failure`].
    pub fn failure(message: impl Into<String>, code: i32) -> Self {
        Self::Failure {
            message: message.into(),
            code,
        }
    }

    /// Builds a failure for a call that never obtained a response.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::failure(message, TRANSPORT_FAILURE_CODE)
    }

    /// Builds a failure for input rejected before a call was issued.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::failure(message, INVALID_INPUT_CODE)
    }

    /// Invokes `handler` with the payload if this is a success.
    ///
    /// The outcome is returned unchanged so calls can be chained.
    pub fn on_success(self, handler: impl FnOnce(&T)) -> Self {
        if let Self::Success(value) = &self {
            handler(value);
        }
        self
    }

    /// Invokes `handler` with the message and code if this is a failure.
    pub fn on_failure(self, handler: impl FnOnce(&str, i32)) -> Self {
        if let Self::Failure { message, code } = &self {
            handler(message, *code);
        }
        self
    }

    /// Invokes `handler` if this is an empty outcome.
    pub fn on_empty(self, handler: impl FnOnce()) -> Self {
        if let Self::Empty = &self {
            handler();
        }
        self
    }

    /// Rewrites a success payload; `Empty` and `Failure` pass through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Empty => Outcome::Empty,
            Self::Failure { message, code } => Outcome::Failure { message, code },
        }
    }

    /// Borrows the payload of a success.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Empty | Self::Failure { .. } => None,
        }
    }

    /// Consumes the outcome, returning the payload of a success.
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Empty | Self::Failure { .. } => None,
        }
    }

    /// Returns the failure code, if this is a failure.
    pub fn failure_code(&self) -> Option<i32> {
        match self {
            Self::Failure { code, .. } => Some(*code),
            Self::Success(_) | Self::Empty => None,
        }
    }

    /// Returns the failure message and code, if this is a failure.
    pub fn as_failure(&self) -> Option<Failure> {
        match self {
            Self::Failure { message, code } => Some(Failure {
                message: message.clone(),
                code: *code,
            }),
            Self::Success(_) | Self::Empty => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure {
            message: failure.message,
            code: failure.code,
        }
    }
}

// ---------------------------------------------------------------------------
// Failure record
// ---------------------------------------------------------------------------

/// A detached failure, as published on repository failure channels.
///
/// Holds the same data as [`Outcome::Failure`] without a payload type so it
/// can be shared between streams of different value types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
    pub code: i32,
}

impl Failure {
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Returns `true` if the failure happened before any server answered.
    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT_FAILURE_CODE
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// A sequence of outcomes produced by a streamed repository operation.
pub type OutcomeStream<T> = Pin<Box<dyn Stream<Item = Outcome<T>> + Send>>;
