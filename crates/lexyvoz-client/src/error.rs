//! Client error type.

use thiserror::Error;

/// Errors for events that cannot be processed in the current state.
///
/// Stale asynchronous results are not errors - they are silently
/// discarded by the generation fence. Errors here mean the caller asked
/// for something structurally impossible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Operation requires held session material.
    #[error("no session material held: cannot {operation}")]
    NoSession {
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// A required input field was empty.
    #[error("empty {field}")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },
}
