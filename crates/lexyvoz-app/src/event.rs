//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - The platform: path-observer firings, redirect completion, user
//!   intents from the login/register screens.
//! - Session notifications translated from the underlying client.

use lexyvoz_client::RegisterRequest;
use lexyvoz_core::{Role, SessionStatus};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The path observer fired with the active route.
    PathChanged(String),

    /// The session status or role changed.
    SessionChanged {
        /// New session status.
        status: SessionStatus,
        /// Normalized role, when a user is held.
        role: Option<Role>,
    },

    /// A scheduled redirect finished executing.
    RedirectCompleted,

    /// The login form was submitted.
    LoginSubmitted {
        /// Email address.
        correo: String,
        /// Plaintext password.
        password: String,
    },

    /// The register form was submitted.
    RegisterSubmitted {
        /// Registration payload.
        request: RegisterRequest,
    },

    /// A login or registration was refused by the backend.
    AuthRefused {
        /// Human-readable reason for the inline error.
        message: String,
    },

    /// The user asked to log out.
    LogoutRequested,

    /// Periodic tick.
    Tick,

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },

    /// The platform is shutting the app down.
    Shutdown,
}
