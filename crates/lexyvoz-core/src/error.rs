//! Error types for the session layer.
//!
//! Strongly-typed errors for the auth and storage boundaries. Failures
//! here are converted to state transitions (logged-out, redirect) at the
//! session boundary; nothing in this taxonomy is fatal to the process.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the auth backend and the credential store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Backend unreachable or the connection dropped mid-request.
    #[error("network error: {reason}")]
    Network {
        /// Underlying transport failure description.
        reason: String,
    },

    /// Request did not complete within the configured bound.
    #[error("request timed out after {elapsed:?}")]
    Timeout {
        /// How long we waited.
        elapsed: Duration,
    },

    /// Backend rejected the credentials (401 or explicit refusal).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Backend responded but the body did not match the expected shape.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// What failed to parse.
        reason: String,
    },

    /// Credential store read/write failure.
    #[error("storage error: {reason}")]
    Storage {
        /// Underlying storage failure description.
        reason: String,
    },
}

impl AuthError {
    /// Returns true if this error is transient and may succeed on retry.
    ///
    /// Transient errors are network or timing failures. Credential
    /// rejection and malformed responses are never transient - retrying
    /// the same request cannot change the outcome.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. } | Self::Storage { .. })
    }
}
