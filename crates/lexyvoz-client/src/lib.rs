//! Client
//!
//! Action-based session bootstrap state machine for the Lexyvoz backend.
//! Manages the credential lifecycle: load persisted material, verify the
//! token against the backend, log in, log out.
//!
//! # Architecture
//!
//! The client follows the same sans-IO, action-based pattern as
//! [`lexyvoz_core`]. It receives events ([`ClientEvent`]), processes them
//! through pure state machine logic, and returns actions
//! ([`ClientAction`]) for the caller to execute. Every verification and
//! login carries a request generation; only the result matching the
//! latest generation is applied, so a check resolving after a logout
//! cannot resurrect the session.
//!
//! # Components
//!
//! - [`SessionClient`]: the bootstrap state machine
//! - [`CredentialStore`]: async boundary to the persisted secure store
//! - [`ClientEvent`]: events fed into the client
//! - [`ClientAction`]: actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides
//! [`transport::AuthBackend`], an HTTP client for the auth endpoints.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod event;
mod storage;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::SessionClient;
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent, RegisterRequest, SessionGrant};
pub use lexyvoz_core::{AuthError, Role, Session, SessionStatus, UserProfile};
pub use storage::{
    CredentialStore, StoredCredentials, TOKEN_KEY, USER_KEY, clear_credentials, load_credentials,
    save_credentials,
};
