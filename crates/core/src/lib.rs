//! Shared primitives for all Rust crates in xdrvault.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across xdrvault crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration store unreachable or the requested name is absent.
    #[error("config unavailable: {0}")]
    ConfigUnavailable(String),

    /// TLS negotiation or certificate failure while reaching the alert source.
    #[error("tls error: {0}")]
    Tls(String),

    /// Non-TLS transport failure (connect, timeout, read).
    #[error("transport error: {0}")]
    Transport(String),

    /// Alert source answered with a non-200 status.
    #[error("api request failed with status {status}: {body}")]
    ApiRequestFailed {
        /// HTTP status code returned by the alert source.
        status: u16,
        /// Response body as received, for diagnostics.
        body: String,
    },

    /// Alert source answered 200 with a body that is not the expected envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Object storage rejected or failed the write.
    #[error("storage write failed: {0}")]
    StorageWriteFailed(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
