//! Client events and actions.

use lexyvoz_core::{AuthError, Role, SessionStatus, UserProfile};
use serde::{Deserialize, Serialize};

/// Token plus user profile issued by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    /// Opaque credential token.
    pub token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Payload for the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub nombre: String,
    /// Email address.
    pub correo: String,
    /// Plaintext password (sent over TLS only).
    pub password: String,
    /// Requested account type (raw backend spelling).
    pub tipo: String,
    /// Doctor specialty, if registering a doctor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidad: Option<String>,
    /// Patient schooling level, if registering a patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escolaridad: Option<String>,
}

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Executing storage and backend actions and feeding results back
/// - Forwarding application intents (login, logout, recheck)
///
/// Results of asynchronous work carry the generation from the action that
/// requested them; stale results are discarded by the state machine.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Begin cold-start bootstrap.
    Bootstrap,

    /// Persisted credentials were read from the store.
    ///
    /// Both fields are optimistic and unverified; `None` means the store
    /// held nothing (or was unavailable, which is treated the same).
    CredentialsLoaded {
        /// Persisted token, if any.
        token: Option<String>,
        /// Persisted user blob, if any.
        user: Option<UserProfile>,
    },

    /// Application wants the held token re-verified.
    Recheck,

    /// Backend confirmed the token.
    VerifySucceeded {
        /// Generation from the `VerifyToken` action.
        generation: u64,
        /// Refreshed user profile from the backend.
        user: UserProfile,
    },

    /// Backend rejected the token, or the request failed.
    ///
    /// Rejection and network failure are deliberately not distinguished;
    /// both degrade to logged-out.
    VerifyFailed {
        /// Generation from the `VerifyToken` action.
        generation: u64,
    },

    /// Application wants to log in.
    Login {
        /// Email address.
        correo: String,
        /// Plaintext password.
        password: String,
    },

    /// Application wants to register a new account.
    Register {
        /// Registration payload.
        request: RegisterRequest,
    },

    /// Backend issued a grant for a login or registration.
    GrantIssued {
        /// Generation from the submit action.
        generation: u64,
        /// Issued token and profile.
        grant: SessionGrant,
    },

    /// Backend refused a login or registration.
    GrantRefused {
        /// Generation from the submit action.
        generation: u64,
        /// Why the grant was refused.
        error: AuthError,
    },

    /// Application wants to log out.
    Logout,
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Read persisted credentials; feed back `CredentialsLoaded`.
    LoadCredentials,

    /// Verify a token against the backend; feed back `VerifySucceeded`
    /// or `VerifyFailed` with the same generation.
    VerifyToken {
        /// Generation fencing this verification.
        generation: u64,
        /// Token to verify.
        token: String,
    },

    /// Submit a login; feed back `GrantIssued` or `GrantRefused`.
    SubmitLogin {
        /// Generation fencing this login.
        generation: u64,
        /// Email address.
        correo: String,
        /// Plaintext password.
        password: String,
    },

    /// Submit a registration; feed back `GrantIssued` or `GrantRefused`.
    SubmitRegister {
        /// Generation fencing this registration.
        generation: u64,
        /// Registration payload.
        request: RegisterRequest,
    },

    /// Persist the current credentials.
    ///
    /// Storage failure must not propagate into the session; log and move
    /// on.
    PersistCredentials {
        /// Token to persist.
        token: String,
        /// User profile to persist.
        user: UserProfile,
    },

    /// Delete persisted credentials (best-effort).
    ClearCredentials,

    /// Tell the backend to revoke a token (fire-and-forget).
    RevokeToken {
        /// Token to revoke.
        token: String,
    },

    /// The session status or role changed; the UI layer should react.
    SessionChanged {
        /// New status.
        status: SessionStatus,
        /// Normalized role, when a user is held.
        role: Option<Role>,
    },

    /// A login or registration was refused; surface an inline error.
    ///
    /// Session status is unchanged.
    AuthRefused {
        /// Why the grant was refused.
        error: AuthError,
    },
}
