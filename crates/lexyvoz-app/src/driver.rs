//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific
//! I/O implementations. Each platform implements the trait to provide
//! navigation, secure storage, and backend access, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use lexyvoz_client::{RegisterRequest, SessionGrant, StoredCredentials};
use lexyvoz_core::{AuthError, UserProfile};

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs against a real navigation stack and
/// in simulation.
///
/// Driver-level failures (`Self::Error`) abort the runtime; auth and
/// storage failures ([`AuthError`]) are expected domain outcomes and are
/// converted to session transitions by the runtime.
///
/// # Implementations
///
/// - **Mobile/web shell**: navigation observer + secure store + HTTP
///   `AuthBackend`
/// - **Simulation**: scripted events, in-memory store, scripted backend
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Replace the current history entry with the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation stack is unavailable.
    fn replace(&mut self, path: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Read persisted credentials from the secure store.
    fn load_credentials(
        &mut self,
    ) -> impl Future<Output = Result<StoredCredentials, AuthError>> + Send;

    /// Persist credentials to the secure store.
    fn store_credentials(
        &mut self,
        token: &str,
        user: &UserProfile,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Delete persisted credentials (best-effort).
    fn clear_credentials(&mut self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Verify a token with the backend, returning the refreshed profile.
    fn verify_token(
        &mut self,
        token: &str,
    ) -> impl Future<Output = Result<UserProfile, AuthError>> + Send;

    /// Submit a login to the backend.
    fn submit_login(
        &mut self,
        correo: &str,
        password: &str,
    ) -> impl Future<Output = Result<SessionGrant, AuthError>> + Send;

    /// Submit a registration to the backend.
    fn submit_register(
        &mut self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<SessionGrant, AuthError>> + Send;

    /// Fire-and-forget server-side token revoke.
    fn revoke_token(&mut self, token: &str) -> impl Future<Output = ()> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the driver and clean up resources.
    fn stop(&mut self);
}
