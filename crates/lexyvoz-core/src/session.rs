//! Session lifecycle state machine.
//!
//! Tracks whether the device holds a valid, server-confirmed session.
//! This is a pure state machine: transitions are driven by discrete
//! events (credentials loaded, verification resolved, login, logout) and
//! verification results are fenced with a request-generation counter so a
//! check that resolves after a logout cannot resurrect the session.
//!
//! # State Machine
//!
//! ```text
//! ┌──────────┐  verify ok   ┌───────────────┐
//! │ Checking │─────────────>│ Authenticated │
//! └──────────┘              └───────────────┘
//!      │                        │        ^
//!      │ no token /             │ logout │ login
//!      │ verify failed          ↓        │
//!      │               ┌─────────────────┐
//!      └──────────────>│ Unauthenticated │
//!                      └─────────────────┘
//! ```
//!
//! `Checking` is the initial state and is re-entered whenever a new
//! verification is minted; consumers must tolerate it as non-terminal.

use crate::{Role, UserProfile};

/// Authentication status.
///
/// Tagged rather than boolean because `Checking` must suppress routing
/// decisions until the session settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session not yet resolved; verification may be in flight.
    Checking,
    /// Token confirmed by the backend; a user profile is present.
    Authenticated,
    /// No valid token is held.
    Unauthenticated,
}

/// Session state machine.
///
/// Single-writer mutable state: every async verification carries the
/// generation minted when it started, and only the result matching the
/// latest generation is applied. Invariants maintained by construction:
/// `Authenticated` implies a non-empty token and a user profile;
/// `Unauthenticated` implies no retained token.
#[derive(Debug, Clone)]
pub struct Session {
    status: SessionStatus,
    token: Option<String>,
    user: Option<UserProfile>,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session in [`SessionStatus::Checking`].
    pub fn new() -> Self {
        Self { status: SessionStatus::Checking, token: None, user: None, generation: 0 }
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Credential token. `None` unless session material is held.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// User profile. `None` unless session material is held.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Normalized role of the current user. `None` if no user is held.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(UserProfile::role)
    }

    /// Generation of the most recently minted verification.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply persisted credentials loaded from storage.
    ///
    /// The material is optimistic and unverified. Returns the generation
    /// to attach to the verification request when a token was found, or
    /// `None` if there is nothing to verify (the session settles as
    /// `Unauthenticated` immediately).
    pub fn hydrate(&mut self, token: Option<String>, user: Option<UserProfile>) -> Option<u64> {
        match token {
            Some(token) if !token.is_empty() => {
                self.status = SessionStatus::Checking;
                self.token = Some(token);
                self.user = user;
                Some(self.mint_generation())
            },
            _ => {
                self.reset();
                None
            },
        }
    }

    /// Mint a generation for a fresh verification of the held token.
    ///
    /// Re-enters `Checking`. Returns `None` if no token is held.
    pub fn begin_recheck(&mut self) -> Option<u64> {
        self.token.as_ref()?;
        self.status = SessionStatus::Checking;
        Some(self.mint_generation())
    }

    /// Apply a successful verification.
    ///
    /// Refreshes the user profile and transitions to `Authenticated`.
    /// Returns `false` when the result is stale (a newer verification or
    /// a logout superseded it) and was discarded.
    pub fn confirm(&mut self, generation: u64, user: UserProfile) -> bool {
        if generation != self.generation || self.token.is_none() {
            return false;
        }
        self.status = SessionStatus::Authenticated;
        self.user = Some(user);
        true
    }

    /// Apply a failed verification.
    ///
    /// Network failure and rejection are not distinguished; both degrade
    /// to `Unauthenticated`. Returns `false` when the result is stale.
    pub fn reject(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.reset();
        true
    }

    /// Apply a successful login or registration.
    ///
    /// Fresh credentials replace whatever was held; any verification in
    /// flight is superseded by the generation bump.
    pub fn establish(&mut self, token: String, user: UserProfile) {
        self.mint_generation();
        self.status = SessionStatus::Authenticated;
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Tear the session down.
    ///
    /// Always succeeds locally; any verification in flight is superseded
    /// by the generation bump.
    pub fn clear(&mut self) {
        self.mint_generation();
        self.reset();
    }

    fn reset(&mut self) {
        self.status = SessionStatus::Unauthenticated;
        self.token = None;
        self.user = None;
    }

    fn mint_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
