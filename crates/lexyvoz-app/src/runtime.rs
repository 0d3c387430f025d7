//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: navigation/guard state machine
//! - [`Bridge`]: session bridge to the client
//! - [`Driver`]: platform-specific I/O
//!
//! Bootstrap is sequential: credentials are loaded, then the token (if
//! any) is verified, before the poll loop starts. Storage failures are
//! logged and treated as "no session"; they never abort the runtime.

use lexyvoz_client::{ClientAction, ClientEvent, StoredCredentials};

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and app.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app, bridge: Bridge::new() }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Bootstraps the session (load credentials, verify token)
    /// 2. Polls for input events from the driver
    /// 3. Processes actions and events between App and Bridge
    /// 4. Executes queued storage/backend effects through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        if self.bootstrap().await? {
            self.driver.stop();
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Resolve the persisted session before the poll loop starts.
    ///
    /// Returns `true` if the application should quit.
    async fn bootstrap(&mut self) -> Result<bool, D::Error> {
        let events = self.bridge.bootstrap();
        if self.process_app_events(events).await? {
            return Ok(true);
        }
        self.flush_effects().await
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let Some(event) = self.driver.poll_event().await? else {
            return Ok(false);
        };

        let actions = self.app.handle(event);
        if self.process_actions(actions).await? {
            return Ok(true);
        }
        self.flush_effects().await
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Replace { path } => {
                        self.driver.replace(&path).await?;
                        pending_actions.extend(self.app.handle(AppEvent::RedirectCompleted));
                    },

                    // Auth intents go through the bridge
                    AppAction::SubmitLogin { .. }
                    | AppAction::SubmitRegister { .. }
                    | AppAction::Logout => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_app_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute queued storage/backend effects until none remain.
    ///
    /// Effects can cascade (a verification failure queues a credential
    /// clear), so this drains the bridge repeatedly.
    async fn flush_effects(&mut self) -> Result<bool, D::Error> {
        loop {
            let effects = self.bridge.take_outgoing();
            if effects.is_empty() {
                return Ok(false);
            }

            for effect in effects {
                let events = self.execute_effect(effect).await;
                if self.process_app_events(events).await? {
                    return Ok(true);
                }
            }
        }
    }

    /// Execute one I/O effect and feed its result back into the bridge.
    async fn execute_effect(&mut self, effect: ClientAction) -> Vec<AppEvent> {
        match effect {
            ClientAction::LoadCredentials => {
                let creds = match self.driver.load_credentials().await {
                    Ok(creds) => creds,
                    Err(e) => {
                        tracing::warn!(error = %e, "credential load failed, assuming no session");
                        StoredCredentials::default()
                    },
                };
                self.bridge.handle_client_event(ClientEvent::CredentialsLoaded {
                    token: creds.token,
                    user: creds.user,
                })
            },
            ClientAction::VerifyToken { generation, token } => {
                match self.driver.verify_token(&token).await {
                    Ok(user) => self
                        .bridge
                        .handle_client_event(ClientEvent::VerifySucceeded { generation, user }),
                    Err(e) => {
                        tracing::warn!(error = %e, "token verification failed");
                        self.bridge.handle_client_event(ClientEvent::VerifyFailed { generation })
                    },
                }
            },
            ClientAction::SubmitLogin { generation, correo, password } => {
                match self.driver.submit_login(&correo, &password).await {
                    Ok(grant) => self
                        .bridge
                        .handle_client_event(ClientEvent::GrantIssued { generation, grant }),
                    Err(error) => self
                        .bridge
                        .handle_client_event(ClientEvent::GrantRefused { generation, error }),
                }
            },
            ClientAction::SubmitRegister { generation, request } => {
                match self.driver.submit_register(&request).await {
                    Ok(grant) => self
                        .bridge
                        .handle_client_event(ClientEvent::GrantIssued { generation, grant }),
                    Err(error) => self
                        .bridge
                        .handle_client_event(ClientEvent::GrantRefused { generation, error }),
                }
            },
            ClientAction::PersistCredentials { token, user } => {
                if let Err(e) = self.driver.store_credentials(&token, &user).await {
                    tracing::warn!(error = %e, "credential persist failed");
                }
                vec![]
            },
            ClientAction::ClearCredentials => {
                if let Err(e) = self.driver.clear_credentials().await {
                    tracing::warn!(error = %e, "credential clear failed");
                }
                vec![]
            },
            ClientAction::RevokeToken { token } => {
                self.driver.revoke_token(&token).await;
                vec![]
            },

            // Session notifications never reach the effect queue.
            ClientAction::SessionChanged { .. } | ClientAction::AuthRefused { .. } => {
                tracing::warn!(?effect, "unexpected session notification in effect queue");
                vec![]
            },
        }
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
