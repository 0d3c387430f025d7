//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface a real mobile/web shell
//! would, but with scripted navigation events, an in-memory credential
//! store, and a scripted backend. It implements
//! [`Driver`] so the same [`lexyvoz_app::Runtime`] orchestration code
//! runs in both production and simulation.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use lexyvoz_app::{App, AppEvent, Driver};
use lexyvoz_client::{
    RegisterRequest, SessionGrant, StoredCredentials, clear_credentials, load_credentials,
    save_credentials,
};
use lexyvoz_core::{AuthError, UserProfile};

use crate::{MemoryStore, SimBackend};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection and redirect observation.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    replaced: Vec<String>,
    renders: usize,
    stopped: bool,
    /// When set, a `replace` enqueues the path-observer firing for the
    /// landing route, as a real navigation stack would.
    echo_navigation: bool,
}

/// Handle for inspecting and scripting a [`SimDriver`] from a test while
/// the runtime owns the driver.
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
    /// Shared credential store.
    pub store: MemoryStore,
    /// Shared scripted backend.
    pub backend: SimBackend,
}

impl SimHandle {
    /// Enqueue an `AppEvent` for the runtime to poll.
    pub fn inject_event(&self, event: AppEvent) {
        self.locked().pending_events.push_back(event);
    }

    /// Enqueue a path-observer firing.
    pub fn inject_path(&self, path: &str) {
        self.inject_event(AppEvent::PathChanged(path.to_owned()));
    }

    /// All `replace` calls issued so far, in order.
    pub fn replaced(&self) -> Vec<String> {
        self.locked().replaced.clone()
    }

    /// Number of renders performed.
    pub fn renders(&self) -> usize {
        self.locked().renders
    }

    /// Whether the driver was stopped.
    pub fn stopped(&self) -> bool {
        self.locked().stopped
    }

    fn locked(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] so the same [`lexyvoz_app::Runtime`]
/// orchestration code runs in production shells and simulation tests.
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    store: MemoryStore,
    backend: SimBackend,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver with an empty store and an empty backend.
    pub fn new() -> Self {
        Self::with_parts(MemoryStore::new(), SimBackend::new())
    }

    /// Create a driver over a pre-seeded store and backend.
    pub fn with_parts(store: MemoryStore, backend: SimBackend) -> Self {
        let state = Arc::new(Mutex::new(SharedState { echo_navigation: true, ..Default::default() }));
        Self { state, store, backend }
    }

    /// Handle for scripting and inspection.
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            state: Arc::clone(&self.state),
            store: self.store.clone(),
            backend: self.backend.clone(),
        }
    }

    fn locked(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.locked().pending_events.pop_front())
    }

    async fn replace(&mut self, path: &str) -> Result<(), Self::Error> {
        let mut state = self.locked();
        state.replaced.push(path.to_owned());
        if state.echo_navigation {
            state.pending_events.push_back(AppEvent::PathChanged(path.to_owned()));
        }
        Ok(())
    }

    async fn load_credentials(&mut self) -> Result<StoredCredentials, AuthError> {
        load_credentials(&self.store).await
    }

    async fn store_credentials(
        &mut self,
        token: &str,
        user: &UserProfile,
    ) -> Result<(), AuthError> {
        save_credentials(&self.store, token, user).await
    }

    async fn clear_credentials(&mut self) -> Result<(), AuthError> {
        clear_credentials(&self.store).await
    }

    async fn verify_token(&mut self, token: &str) -> Result<UserProfile, AuthError> {
        self.backend.verify(token)
    }

    async fn submit_login(
        &mut self,
        correo: &str,
        password: &str,
    ) -> Result<SessionGrant, AuthError> {
        self.backend.login(correo, password)
    }

    async fn submit_register(
        &mut self,
        request: &RegisterRequest,
    ) -> Result<SessionGrant, AuthError> {
        self.backend.register(request)
    }

    async fn revoke_token(&mut self, token: &str) {
        self.backend.revoke(token);
    }

    fn render(&mut self, _app: &App) -> Result<(), Self::Error> {
        self.locked().renders += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.locked().stopped = true;
    }
}
