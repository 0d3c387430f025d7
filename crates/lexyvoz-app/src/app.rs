//! Application state machine.
//!
//! This module defines the [`App`] state machine, which enforces the
//! role route guard over the observed navigation state, completely
//! decoupled from I/O and the navigation library.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs
//! and produces [`crate::AppAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Tracks the current path and the latest session status/role.
//! - Re-evaluates the guard on every path and session change.
//! - Bounds redirects to one in flight at a time: re-evaluations while a
//!   redirect executes emit nothing, so rapid path-observer firings
//!   cannot enqueue competing redirects.

use lexyvoz_core::{GuardDecision, Role, RouteTable, SessionStatus};

use crate::{AppAction, AppEvent};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Route allow-lists and home routes.
    routes: RouteTable,
    /// Latest observed session status.
    status: SessionStatus,
    /// Latest observed role. `None` until a user is held.
    role: Option<Role>,
    /// Current path. Empty until the path observer first fires.
    path: String,
    /// A redirect has been emitted and has not completed yet.
    redirect_in_flight: bool,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App with the given route table.
    ///
    /// The session starts as `Checking`: nothing is enforced until the
    /// bootstrap settles.
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            status: SessionStatus::Checking,
            role: None,
            path: String::new(),
            redirect_in_flight: false,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::PathChanged(path) => {
                if self.redirect_in_flight {
                    // The in-flight redirect owns navigation; observer
                    // noise during the transition is dropped.
                    return vec![];
                }
                self.path = path;
                self.enforce()
            },
            AppEvent::SessionChanged { status, role } => {
                self.status = status;
                self.role = role;
                if self.redirect_in_flight {
                    return vec![];
                }
                self.enforce()
            },
            AppEvent::RedirectCompleted => {
                self.redirect_in_flight = false;
                self.enforce()
            },
            AppEvent::LoginSubmitted { correo, password } => {
                self.status_message = Some("Iniciando sesión...".into());
                vec![AppAction::SubmitLogin { correo, password }, AppAction::Render]
            },
            AppEvent::RegisterSubmitted { request } => {
                self.status_message = Some("Creando cuenta...".into());
                vec![AppAction::SubmitRegister { request }, AppAction::Render]
            },
            AppEvent::AuthRefused { message } => {
                self.status_message = Some(message);
                vec![AppAction::Render]
            },
            AppEvent::LogoutRequested => {
                self.status_message = None;
                vec![AppAction::Logout, AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
            AppEvent::Shutdown => vec![AppAction::Quit],
        }
    }

    /// Evaluate the guard for the current state and schedule a redirect
    /// if the path is denied.
    ///
    /// The path is updated optimistically when a redirect is emitted so
    /// that completion re-evaluates the landing route, not the denied
    /// one.
    fn enforce(&mut self) -> Vec<AppAction> {
        match self.routes.evaluate(self.status, self.role, &self.path) {
            GuardDecision::Allow => vec![AppAction::Render],
            GuardDecision::Redirect { to } => {
                self.redirect_in_flight = true;
                self.path.clone_from(&to);
                vec![AppAction::Replace { path: to }, AppAction::Render]
            },
        }
    }

    /// Latest observed session status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Latest observed role.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Current path (optimistically the redirect target while one is in
    /// flight).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a redirect is currently executing.
    pub fn redirect_in_flight(&self) -> bool {
        self.redirect_in_flight
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(RouteTable::lexyvoz())
    }

    fn authenticated_app(role: Role) -> App {
        let mut app = app();
        let _ = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Authenticated,
            role: Some(role),
        });
        app
    }

    fn replace_targets(actions: &[AppAction]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|a| match a {
                AppAction::Replace { path } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn checking_session_never_redirects() {
        let mut app = app();
        let actions = app.handle(AppEvent::PathChanged("/admin".into()));
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(!app.redirect_in_flight());
    }

    #[test]
    fn unauthenticated_protected_path_redirects_to_login() {
        let mut app = app();
        let _ = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Unauthenticated,
            role: None,
        });

        let actions = app.handle(AppEvent::PathChanged("/main".into()));
        assert_eq!(replace_targets(&actions), vec!["/login"]);
        assert_eq!(app.path(), "/login");
    }

    #[test]
    fn rapid_denied_firings_emit_a_single_replace() {
        let mut app = app();
        let _ = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Unauthenticated,
            role: None,
        });

        let first = app.handle(AppEvent::PathChanged("/main".into()));
        let second = app.handle(AppEvent::PathChanged("/main".into()));

        assert_eq!(replace_targets(&first).len(), 1);
        assert!(replace_targets(&second).is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn redirect_completion_settles_without_a_second_replace() {
        let mut app = app();
        let _ = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Unauthenticated,
            role: None,
        });
        let _ = app.handle(AppEvent::PathChanged("/main".into()));

        let actions = app.handle(AppEvent::RedirectCompleted);
        assert!(replace_targets(&actions).is_empty());
        assert!(!app.redirect_in_flight());

        // Observer fires with the landing route; still settled.
        let actions = app.handle(AppEvent::PathChanged("/login".into()));
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn authenticated_patient_bounces_off_login() {
        let mut app = authenticated_app(Role::Paciente);
        let actions = app.handle(AppEvent::PathChanged("/login".into()));
        assert_eq!(replace_targets(&actions), vec!["/home"]);
    }

    #[test]
    fn doctor_subpath_is_permitted() {
        let mut app = authenticated_app(Role::Doctor);
        let actions = app.handle(AppEvent::PathChanged("/kits/editKit/42".into()));
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn doctor_on_admin_path_goes_home() {
        let mut app = authenticated_app(Role::Doctor);
        let actions = app.handle(AppEvent::PathChanged("/admin".into()));
        assert_eq!(replace_targets(&actions), vec!["/main"]);
    }

    #[test]
    fn logout_during_flight_enforces_after_completion() {
        let mut app = authenticated_app(Role::Doctor);
        let _ = app.handle(AppEvent::PathChanged("/admin".into()));
        assert!(app.redirect_in_flight());

        // Session drops while the redirect executes; no competing
        // redirect is emitted yet.
        let actions = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Unauthenticated,
            role: None,
        });
        assert!(actions.is_empty());

        // Completion re-evaluates the landing route under the new
        // session and issues the follow-up hop.
        let actions = app.handle(AppEvent::RedirectCompleted);
        assert_eq!(replace_targets(&actions), vec!["/login"]);
    }

    #[test]
    fn empty_path_is_ignored_until_observer_fires() {
        let mut app = app();
        let actions = app.handle(AppEvent::SessionChanged {
            status: SessionStatus::Unauthenticated,
            role: None,
        });
        // No real path yet: allowed, no redirect.
        assert_eq!(actions, vec![AppAction::Render]);
    }

    #[test]
    fn login_submission_sets_status_message() {
        let mut app = app();
        let actions = app.handle(AppEvent::LoginSubmitted {
            correo: "a@b.c".into(),
            password: "x".into(),
        });

        assert!(matches!(actions.as_slice(), [AppAction::SubmitLogin { .. }, AppAction::Render]));
        assert_eq!(app.status_message(), Some("Iniciando sesión..."));
    }

    #[test]
    fn refused_auth_surfaces_inline_message() {
        let mut app = app();
        let actions = app.handle(AppEvent::AuthRefused { message: "invalid credentials".into() });
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.status_message(), Some("invalid credentials"));
    }

    #[test]
    fn shutdown_quits() {
        let mut app = app();
        assert_eq!(app.handle(AppEvent::Shutdown), vec![AppAction::Quit]);
    }
}
