//! Session client state machine.
//!
//! The `SessionClient` is the top-level state machine that drives the
//! session bootstrap: load persisted credentials, verify the token with
//! the backend, and process login/logout intents. All I/O is delegated to
//! the caller through [`ClientAction`]s.

use lexyvoz_core::{Session, SessionStatus, UserProfile};

use crate::{
    error::ClientError,
    event::{ClientAction, ClientEvent, RegisterRequest, SessionGrant},
};

/// Session bootstrap state machine.
///
/// Wraps [`Session`] and translates discrete events into state
/// transitions plus actions for the caller to execute. Asynchronous
/// results (verification, grants) are fenced by request generation;
/// anything stale is discarded without producing actions.
#[derive(Debug, Clone, Default)]
pub struct SessionClient {
    session: Session,
}

impl SessionClient {
    /// Create a new client with a fresh `Checking` session.
    pub fn new() -> Self {
        Self { session: Session::new() }
    }

    /// The underlying session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Bootstrap => Ok(vec![ClientAction::LoadCredentials]),
            ClientEvent::CredentialsLoaded { token, user } => {
                Ok(self.handle_credentials_loaded(token, user))
            },
            ClientEvent::Recheck => self.handle_recheck(),
            ClientEvent::VerifySucceeded { generation, user } => {
                Ok(self.handle_verify_succeeded(generation, user))
            },
            ClientEvent::VerifyFailed { generation } => Ok(self.handle_verify_failed(generation)),
            ClientEvent::Login { correo, password } => self.handle_login(correo, password),
            ClientEvent::Register { request } => self.handle_register(request),
            ClientEvent::GrantIssued { generation, grant } => {
                Ok(self.handle_grant_issued(generation, grant))
            },
            ClientEvent::GrantRefused { generation, error } => {
                Ok(self.handle_grant_refused(generation, error))
            },
            ClientEvent::Logout => Ok(self.handle_logout()),
        }
    }

    fn handle_credentials_loaded(
        &mut self,
        token: Option<String>,
        user: Option<UserProfile>,
    ) -> Vec<ClientAction> {
        match self.session.hydrate(token, user) {
            Some(generation) => {
                // Token is present by construction after a successful hydrate.
                let token = self.session.token().unwrap_or_default().to_owned();
                vec![ClientAction::VerifyToken { generation, token }]
            },
            None => vec![self.session_changed()],
        }
    }

    fn handle_recheck(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let generation = self
            .session
            .begin_recheck()
            .ok_or(ClientError::NoSession { operation: "recheck" })?;
        let token = self.session.token().unwrap_or_default().to_owned();
        Ok(vec![self.session_changed(), ClientAction::VerifyToken { generation, token }])
    }

    fn handle_verify_succeeded(
        &mut self,
        generation: u64,
        user: UserProfile,
    ) -> Vec<ClientAction> {
        if !self.session.confirm(generation, user) {
            return vec![];
        }
        let mut actions = Vec::new();
        if let (Some(token), Some(user)) = (self.session.token(), self.session.user()) {
            actions.push(ClientAction::PersistCredentials {
                token: token.to_owned(),
                user: user.clone(),
            });
        }
        actions.push(self.session_changed());
        actions
    }

    fn handle_verify_failed(&mut self, generation: u64) -> Vec<ClientAction> {
        if !self.session.reject(generation) {
            return vec![];
        }
        vec![ClientAction::ClearCredentials, self.session_changed()]
    }

    fn handle_login(
        &mut self,
        correo: String,
        password: String,
    ) -> Result<Vec<ClientAction>, ClientError> {
        if correo.trim().is_empty() {
            return Err(ClientError::EmptyField { field: "correo" });
        }
        if password.is_empty() {
            return Err(ClientError::EmptyField { field: "password" });
        }
        Ok(vec![ClientAction::SubmitLogin {
            generation: self.session.generation(),
            correo,
            password,
        }])
    }

    fn handle_register(
        &mut self,
        request: RegisterRequest,
    ) -> Result<Vec<ClientAction>, ClientError> {
        if request.correo.trim().is_empty() {
            return Err(ClientError::EmptyField { field: "correo" });
        }
        if request.password.is_empty() {
            return Err(ClientError::EmptyField { field: "password" });
        }
        if request.nombre.trim().is_empty() {
            return Err(ClientError::EmptyField { field: "nombre" });
        }
        Ok(vec![ClientAction::SubmitRegister {
            generation: self.session.generation(),
            request,
        }])
    }

    fn handle_grant_issued(&mut self, generation: u64, grant: SessionGrant) -> Vec<ClientAction> {
        // A logout (or any newer credential movement) since the submit
        // supersedes this grant.
        if generation != self.session.generation() {
            return vec![];
        }
        self.session.establish(grant.token.clone(), grant.user.clone());
        vec![
            ClientAction::PersistCredentials { token: grant.token, user: grant.user },
            self.session_changed(),
        ]
    }

    fn handle_grant_refused(
        &mut self,
        generation: u64,
        error: lexyvoz_core::AuthError,
    ) -> Vec<ClientAction> {
        if generation != self.session.generation() {
            return vec![];
        }
        // Status is deliberately unchanged; the UI surfaces an inline
        // error and the user may retry.
        vec![ClientAction::AuthRefused { error }]
    }

    fn handle_logout(&mut self) -> Vec<ClientAction> {
        let token = self.session.token().map(str::to_owned);
        self.session.clear();

        let mut actions = vec![ClientAction::ClearCredentials];
        if let Some(token) = token {
            actions.push(ClientAction::RevokeToken { token });
        }
        actions.push(self.session_changed());
        actions
    }

    fn session_changed(&self) -> ClientAction {
        ClientAction::SessionChanged {
            status: self.session.status(),
            role: self.session.role(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lexyvoz_core::{AuthError, Role};

    use super::*;

    fn doctor() -> UserProfile {
        UserProfile {
            id: 9,
            nombre: "Marta".into(),
            correo: "marta@lexyvoz.test".into(),
            tipo: "doctora".into(),
            imagen_url: None,
            especialidad: Some("Neurología".into()),
            escolaridad: None,
            fecha_creacion: None,
        }
    }

    fn grant() -> SessionGrant {
        SessionGrant { token: "fresh-token".into(), user: doctor() }
    }

    #[test]
    fn bootstrap_requests_credential_load() {
        let mut client = SessionClient::new();
        let actions = client.handle(ClientEvent::Bootstrap).unwrap();
        assert_eq!(actions, vec![ClientAction::LoadCredentials]);
    }

    #[test]
    fn empty_store_settles_unauthenticated_without_network() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: None, user: None })
            .unwrap();

        assert_eq!(client.status(), SessionStatus::Unauthenticated);
        assert_eq!(
            actions,
            vec![ClientAction::SessionChanged {
                status: SessionStatus::Unauthenticated,
                role: None,
            }]
        );
    }

    #[test]
    fn stored_token_triggers_verification() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded {
                token: Some("tok".into()),
                user: Some(doctor()),
            })
            .unwrap();

        assert_eq!(client.status(), SessionStatus::Checking);
        assert!(matches!(
            actions.as_slice(),
            [ClientAction::VerifyToken { token, .. }] if token == "tok"
        ));
    }

    #[test]
    fn verify_success_persists_and_authenticates() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: Some("tok".into()), user: None })
            .unwrap();
        let Some(ClientAction::VerifyToken { generation, .. }) = actions.first() else {
            unreachable!("expected VerifyToken");
        };

        let actions = client
            .handle(ClientEvent::VerifySucceeded { generation: *generation, user: doctor() })
            .unwrap();

        assert_eq!(client.status(), SessionStatus::Authenticated);
        assert!(matches!(
            actions.as_slice(),
            [
                ClientAction::PersistCredentials { .. },
                ClientAction::SessionChanged { status: SessionStatus::Authenticated, role: Some(Role::Doctor) },
            ]
        ));
    }

    #[test]
    fn verify_failure_clears_credentials() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: Some("tok".into()), user: None })
            .unwrap();
        let Some(ClientAction::VerifyToken { generation, .. }) = actions.first() else {
            unreachable!("expected VerifyToken");
        };

        let actions = client.handle(ClientEvent::VerifyFailed { generation: *generation }).unwrap();

        assert_eq!(client.status(), SessionStatus::Unauthenticated);
        assert!(matches!(
            actions.as_slice(),
            [
                ClientAction::ClearCredentials,
                ClientAction::SessionChanged { status: SessionStatus::Unauthenticated, role: None },
            ]
        ));
    }

    #[test]
    fn late_verify_success_after_logout_is_discarded() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: Some("tok".into()), user: None })
            .unwrap();
        let Some(ClientAction::VerifyToken { generation, .. }) = actions.first() else {
            unreachable!("expected VerifyToken");
        };
        let generation = *generation;

        let _ = client.handle(ClientEvent::Logout).unwrap();
        let actions =
            client.handle(ClientEvent::VerifySucceeded { generation, user: doctor() }).unwrap();

        assert!(actions.is_empty());
        assert_eq!(client.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn login_produces_submit_and_grant_authenticates() {
        let mut client = SessionClient::new();
        let _ = client.handle(ClientEvent::CredentialsLoaded { token: None, user: None }).unwrap();

        let actions = client
            .handle(ClientEvent::Login {
                correo: "marta@lexyvoz.test".into(),
                password: "hunter2".into(),
            })
            .unwrap();
        let Some(ClientAction::SubmitLogin { generation, .. }) = actions.first() else {
            unreachable!("expected SubmitLogin");
        };

        let actions = client
            .handle(ClientEvent::GrantIssued { generation: *generation, grant: grant() })
            .unwrap();

        assert_eq!(client.status(), SessionStatus::Authenticated);
        assert!(matches!(actions.first(), Some(ClientAction::PersistCredentials { .. })));
    }

    #[test]
    fn refused_grant_leaves_status_unchanged() {
        let mut client = SessionClient::new();
        let _ = client.handle(ClientEvent::CredentialsLoaded { token: None, user: None }).unwrap();

        let actions = client
            .handle(ClientEvent::Login { correo: "a@b.c".into(), password: "x".into() })
            .unwrap();
        let Some(ClientAction::SubmitLogin { generation, .. }) = actions.first() else {
            unreachable!("expected SubmitLogin");
        };

        let actions = client
            .handle(ClientEvent::GrantRefused {
                generation: *generation,
                error: AuthError::InvalidCredentials,
            })
            .unwrap();

        assert_eq!(client.status(), SessionStatus::Unauthenticated);
        assert!(matches!(actions.as_slice(), [ClientAction::AuthRefused { .. }]));
    }

    #[test]
    fn late_grant_after_logout_is_discarded() {
        let mut client = SessionClient::new();
        let _ = client.handle(ClientEvent::CredentialsLoaded { token: None, user: None }).unwrap();

        let actions = client
            .handle(ClientEvent::Login { correo: "a@b.c".into(), password: "x".into() })
            .unwrap();
        let Some(ClientAction::SubmitLogin { generation, .. }) = actions.first() else {
            unreachable!("expected SubmitLogin");
        };
        let generation = *generation;

        let _ = client.handle(ClientEvent::Logout).unwrap();
        let actions = client.handle(ClientEvent::GrantIssued { generation, grant: grant() }).unwrap();

        assert!(actions.is_empty());
        assert_eq!(client.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn login_rejects_empty_fields() {
        let mut client = SessionClient::new();
        let err = client
            .handle(ClientEvent::Login { correo: "  ".into(), password: "x".into() })
            .unwrap_err();
        assert_eq!(err, ClientError::EmptyField { field: "correo" });

        let err = client
            .handle(ClientEvent::Login { correo: "a@b.c".into(), password: String::new() })
            .unwrap_err();
        assert_eq!(err, ClientError::EmptyField { field: "password" });
    }

    #[test]
    fn logout_clears_revokes_and_notifies() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: Some("tok".into()), user: None })
            .unwrap();
        let Some(ClientAction::VerifyToken { generation, .. }) = actions.first() else {
            unreachable!("expected VerifyToken");
        };
        let _ = client
            .handle(ClientEvent::VerifySucceeded { generation: *generation, user: doctor() })
            .unwrap();

        let actions = client.handle(ClientEvent::Logout).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [
                ClientAction::ClearCredentials,
                ClientAction::RevokeToken { token },
                ClientAction::SessionChanged { status: SessionStatus::Unauthenticated, role: None },
            ] if token == "tok"
        ));
    }

    #[test]
    fn recheck_without_session_is_an_error() {
        let mut client = SessionClient::new();
        let _ = client.handle(ClientEvent::CredentialsLoaded { token: None, user: None }).unwrap();

        let err = client.handle(ClientEvent::Recheck).unwrap_err();
        assert_eq!(err, ClientError::NoSession { operation: "recheck" });
    }

    #[test]
    fn recheck_reenters_checking() {
        let mut client = SessionClient::new();
        let actions = client
            .handle(ClientEvent::CredentialsLoaded { token: Some("tok".into()), user: None })
            .unwrap();
        let Some(ClientAction::VerifyToken { generation, .. }) = actions.first() else {
            unreachable!("expected VerifyToken");
        };
        let _ = client
            .handle(ClientEvent::VerifySucceeded { generation: *generation, user: doctor() })
            .unwrap();

        let actions = client.handle(ClientEvent::Recheck).unwrap();
        assert_eq!(client.status(), SessionStatus::Checking);
        assert!(matches!(
            actions.as_slice(),
            [
                ClientAction::SessionChanged { status: SessionStatus::Checking, .. },
                ClientAction::VerifyToken { .. },
            ]
        ));
    }
}
