//! Session-to-Application translation layer.
//!
//! The [`Bridge`] wraps the sans-IO [`lexyvoz_client::SessionClient`]
//! and adapts it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] auth intents into
//!   [`ClientEvent`]s.
//! - Accumulates the client's I/O actions (storage reads/writes, backend
//!   calls) to be executed by the driver in the next cycle.
//! - Interprets session notifications from the client and converts them
//!   back into [`crate::AppEvent`]s to update the UI.

use lexyvoz_client::{ClientAction, ClientError, ClientEvent, SessionClient};
use lexyvoz_core::{Role, SessionStatus};

use crate::{AppAction, AppEvent};

/// Bridge between App and the session client.
pub struct Bridge {
    client: SessionClient,
    outgoing: Vec<ClientAction>,
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Bridge {
    /// Create a new Bridge with a fresh session.
    pub fn new() -> Self {
        Self { client: SessionClient::new(), outgoing: Vec::new() }
    }

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        self.client.status()
    }

    /// Normalized role of the current user, if any.
    pub fn role(&self) -> Option<Role> {
        self.client.session().role()
    }

    /// Kick off the cold-start bootstrap.
    pub fn bootstrap(&mut self) -> Vec<AppEvent> {
        self.feed(ClientEvent::Bootstrap)
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SubmitLogin { correo, password } => {
                self.feed(ClientEvent::Login { correo, password })
            },
            AppAction::SubmitRegister { request } => self.feed(ClientEvent::Register { request }),
            AppAction::Logout => self.feed(ClientEvent::Logout),
            AppAction::Render | AppAction::Replace { .. } | AppAction::Quit => vec![],
        }
    }

    /// Feed a client event (typically an I/O result) back into the
    /// session state machine.
    pub fn handle_client_event(&mut self, event: ClientEvent) -> Vec<AppEvent> {
        self.feed(event)
    }

    /// Take pending I/O actions for the driver to execute.
    pub fn take_outgoing(&mut self) -> Vec<ClientAction> {
        std::mem::take(&mut self.outgoing)
    }

    fn feed(&mut self, event: ClientEvent) -> Vec<AppEvent> {
        match self.client.handle(event) {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) => vec![Self::client_error_event(&e)],
        }
    }

    fn client_error_event(error: &ClientError) -> AppEvent {
        AppEvent::Error { message: error.to_string() }
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::SessionChanged { status, role } => {
                    events.push(AppEvent::SessionChanged { status, role });
                },
                ClientAction::AuthRefused { error } => {
                    events.push(AppEvent::AuthRefused { message: error.to_string() });
                },

                // I/O goes to the driver
                ClientAction::LoadCredentials
                | ClientAction::VerifyToken { .. }
                | ClientAction::SubmitLogin { .. }
                | ClientAction::SubmitRegister { .. }
                | ClientAction::PersistCredentials { .. }
                | ClientAction::ClearCredentials
                | ClientAction::RevokeToken { .. } => {
                    self.outgoing.push(action);
                },
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use lexyvoz_client::{SessionGrant, UserProfile};

    use super::*;

    fn admin() -> UserProfile {
        UserProfile {
            id: 1,
            nombre: "Root".into(),
            correo: "root@lexyvoz.test".into(),
            tipo: "Administrador".into(),
            imagen_url: None,
            especialidad: None,
            escolaridad: None,
            fecha_creacion: None,
        }
    }

    #[test]
    fn bootstrap_queues_credential_load() {
        let mut bridge = Bridge::new();
        let events = bridge.bootstrap();

        assert!(events.is_empty());
        assert_eq!(bridge.take_outgoing(), vec![ClientAction::LoadCredentials]);
    }

    #[test]
    fn login_intent_queues_submit() {
        let mut bridge = Bridge::new();
        let events = bridge.process_app_action(AppAction::SubmitLogin {
            correo: "root@lexyvoz.test".into(),
            password: "secret".into(),
        });

        assert!(events.is_empty());
        assert!(matches!(
            bridge.take_outgoing().as_slice(),
            [ClientAction::SubmitLogin { .. }]
        ));
    }

    #[test]
    fn invalid_login_intent_becomes_error_event() {
        let mut bridge = Bridge::new();
        let events = bridge.process_app_action(AppAction::SubmitLogin {
            correo: String::new(),
            password: "secret".into(),
        });

        assert!(matches!(events.as_slice(), [AppEvent::Error { .. }]));
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn grant_produces_session_changed_and_persist() {
        let mut bridge = Bridge::new();
        let _ = bridge.handle_client_event(ClientEvent::CredentialsLoaded {
            token: None,
            user: None,
        });
        let _ = bridge.take_outgoing();

        let _ = bridge.process_app_action(AppAction::SubmitLogin {
            correo: "root@lexyvoz.test".into(),
            password: "secret".into(),
        });
        let outgoing = bridge.take_outgoing();
        let Some(ClientAction::SubmitLogin { generation, .. }) = outgoing.first() else {
            unreachable!("expected SubmitLogin");
        };

        let events = bridge.handle_client_event(ClientEvent::GrantIssued {
            generation: *generation,
            grant: SessionGrant { token: "tok".into(), user: admin() },
        });

        assert!(matches!(
            events.as_slice(),
            [AppEvent::SessionChanged { status: SessionStatus::Authenticated, role: Some(Role::Admin) }]
        ));
        assert!(matches!(
            bridge.take_outgoing().as_slice(),
            [ClientAction::PersistCredentials { .. }]
        ));
    }

    #[test]
    fn render_and_replace_do_not_touch_the_session() {
        let mut bridge = Bridge::new();
        assert!(bridge.process_app_action(AppAction::Render).is_empty());
        assert!(bridge.process_app_action(AppAction::Replace { path: "/login".into() }).is_empty());
        assert!(bridge.take_outgoing().is_empty());
    }
}
