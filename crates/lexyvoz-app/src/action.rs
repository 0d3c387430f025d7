//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents
//! instructions produced by the [`crate::App`] state machine for the
//! runtime to execute.

use lexyvoz_client::RegisterRequest;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Replace the current history entry with this path.
    ///
    /// Always a replace, never a push, so denied routes do not grow the
    /// navigation history.
    Replace {
        /// Redirect target path.
        path: String,
    },

    /// Submit a login to the backend.
    SubmitLogin {
        /// Email address.
        correo: String,
        /// Plaintext password.
        password: String,
    },

    /// Submit a registration to the backend.
    SubmitRegister {
        /// Registration payload.
        request: RegisterRequest,
    },

    /// Tear the session down.
    Logout,

    /// Quit the application.
    Quit,
}
