//! Scripted auth backend for simulation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use lexyvoz_client::{RegisterRequest, SessionGrant};
use lexyvoz_core::{AuthError, UserProfile};

#[derive(Default)]
struct Inner {
    /// Tokens the backend will confirm, with the profile each resolves
    /// to.
    tokens: HashMap<String, UserProfile>,
    /// Accounts keyed by email: (password, grant issued on login).
    accounts: HashMap<String, (String, SessionGrant)>,
    /// Tokens revoked via the logout endpoint.
    revoked: Vec<String>,
    /// When set, every request fails as unreachable.
    network_down: bool,
}

/// Scripted auth backend.
///
/// Stands in for the HTTP `AuthBackend`: tests register valid tokens and
/// accounts up front, and can take the network down to exercise the
/// degrade-to-logged-out paths. Clones share state.
#[derive(Clone, Default)]
pub struct SimBackend {
    inner: Arc<Mutex<Inner>>,
}

impl SimBackend {
    /// Create a backend that knows no tokens or accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token as valid, resolving to the given profile.
    pub fn issue_token(&self, token: &str, user: UserProfile) {
        self.locked().tokens.insert(token.to_owned(), user);
    }

    /// Register an account for login.
    pub fn register_account(&self, correo: &str, password: &str, grant: SessionGrant) {
        self.locked().accounts.insert(correo.to_owned(), (password.to_owned(), grant));
    }

    /// Simulate the backend being unreachable.
    pub fn set_network_down(&self, down: bool) {
        self.locked().network_down = down;
    }

    /// Tokens revoked so far.
    pub fn revoked(&self) -> Vec<String> {
        self.locked().revoked.clone()
    }

    /// `GET /auth/check-status` equivalent.
    pub fn verify(&self, token: &str) -> Result<UserProfile, AuthError> {
        let inner = self.locked();
        if inner.network_down {
            return Err(AuthError::Network { reason: "simulated outage".into() });
        }
        inner.tokens.get(token).cloned().ok_or(AuthError::InvalidCredentials)
    }

    /// `POST /auth/login` equivalent.
    pub fn login(&self, correo: &str, password: &str) -> Result<SessionGrant, AuthError> {
        let mut inner = self.locked();
        if inner.network_down {
            return Err(AuthError::Network { reason: "simulated outage".into() });
        }
        let Some((expected, grant)) = inner.accounts.get(correo).cloned() else {
            return Err(AuthError::InvalidCredentials);
        };
        if expected != password {
            return Err(AuthError::InvalidCredentials);
        }
        // A login freshens the token's validity for later checks.
        inner.tokens.insert(grant.token.clone(), grant.user.clone());
        Ok(grant)
    }

    /// `POST /auth/register` equivalent.
    ///
    /// Accepts any request for an unknown email and mints a token named
    /// after it.
    pub fn register(&self, request: &RegisterRequest) -> Result<SessionGrant, AuthError> {
        let mut inner = self.locked();
        if inner.network_down {
            return Err(AuthError::Network { reason: "simulated outage".into() });
        }
        if inner.accounts.contains_key(&request.correo) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = UserProfile {
            id: inner.accounts.len() as i64 + 1,
            nombre: request.nombre.clone(),
            correo: request.correo.clone(),
            tipo: request.tipo.clone(),
            imagen_url: None,
            especialidad: request.especialidad.clone(),
            escolaridad: request.escolaridad.clone(),
            fecha_creacion: None,
        };
        let grant = SessionGrant { token: format!("token-{}", request.correo), user };

        inner
            .accounts
            .insert(request.correo.clone(), (request.password.clone(), grant.clone()));
        inner.tokens.insert(grant.token.clone(), grant.user.clone());
        Ok(grant)
    }

    /// `POST /auth/logout` equivalent. Always succeeds locally.
    pub fn revoke(&self, token: &str) {
        let mut inner = self.locked();
        inner.tokens.remove(token);
        inner.revoked.push(token.to_owned());
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
