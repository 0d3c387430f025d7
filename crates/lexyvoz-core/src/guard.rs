//! Role-based route guard.
//!
//! A pure decision function: given the session status, the normalized
//! role, and the current path, decide whether the path is permitted or
//! where to redirect. No navigation happens here; the application layer
//! executes [`GuardDecision::Redirect`] with a history *replace* and owns
//! redirect de-duplication.

use std::collections::HashMap;

use crate::{Role, SessionStatus};

/// Outcome of a guard evaluation.
///
/// Evaluation is deterministic: a fixed `(status, role, path)` triple
/// always produces the same decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The path is permitted (or the guard must wait for the session to
    /// settle); take no action.
    Allow,
    /// Replace the current history entry with this path.
    Redirect {
        /// Redirect target path.
        to: String,
    },
}

/// Per-role route allow-lists and home routes.
///
/// The table is static configuration: it carries no lifecycle and is
/// consulted on every evaluation. Missing entries degrade to the most
/// restrictive configuration instead of failing.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Prefixes reachable without a session (login, register, password).
    public: Vec<String>,
    /// Redirect target for unauthenticated access to protected paths.
    login: String,
    allow: HashMap<Role, Vec<String>>,
    home: HashMap<Role, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::lexyvoz()
    }
}

impl RouteTable {
    /// Empty table with the given public prefixes and login route.
    ///
    /// Roles without [`Self::allow`]/[`Self::home`] entries fall back to
    /// the `Usuario` entry, then to the login route.
    pub fn new(public: impl IntoIterator<Item = impl Into<String>>, login: impl Into<String>) -> Self {
        Self {
            public: public.into_iter().map(Into::into).collect(),
            login: login.into(),
            allow: HashMap::new(),
            home: HashMap::new(),
        }
    }

    /// Register the allowed path prefixes for a role.
    #[must_use]
    pub fn allow(mut self, role: Role, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allow.insert(role, prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Register the home route for a role.
    #[must_use]
    pub fn home(mut self, role: Role, path: impl Into<String>) -> Self {
        self.home.insert(role, path.into());
        self
    }

    /// The full Lexyvoz route table.
    pub fn lexyvoz() -> Self {
        let mut table = Self::new(["/login", "/registro", "/password"], "/login");
        for role in [Role::Admin, Role::Doctor, Role::Paciente, Role::Usuario] {
            table = table
                .allow(role, role.allowed_prefixes().iter().copied())
                .home(role, role.home_route());
        }
        table
    }

    /// Evaluate the guard for the current navigation state.
    ///
    /// - Empty path: the guard waits for a real path (no action).
    /// - `Checking`, or authenticated with an unresolved role: no action,
    ///   to avoid redirect thrashing before the session settles.
    /// - `Unauthenticated`: public prefixes only; everything else
    ///   redirects to the login route.
    /// - `Authenticated`: public paths and paths outside the role's
    ///   allow-list redirect to the role's home route.
    pub fn evaluate(&self, status: SessionStatus, role: Option<Role>, path: &str) -> GuardDecision {
        if path.is_empty() {
            return GuardDecision::Allow;
        }

        match status {
            SessionStatus::Checking => GuardDecision::Allow,
            SessionStatus::Unauthenticated => {
                if self.is_public(path) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::Redirect { to: self.login.clone() }
                }
            },
            SessionStatus::Authenticated => {
                let Some(role) = role else {
                    return GuardDecision::Allow;
                };
                let home = self.home_for(role);

                // Logged-in users never see login/register screens.
                if self.is_public(path) {
                    return GuardDecision::Redirect { to: home };
                }
                if self.allowed_for(role).iter().any(|prefix| path_matches(path, prefix)) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::Redirect { to: home }
                }
            },
        }
    }

    fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|prefix| path_matches(path, prefix))
    }

    fn home_for(&self, role: Role) -> String {
        self.home
            .get(&role)
            .or_else(|| self.home.get(&Role::Usuario))
            .cloned()
            .unwrap_or_else(|| self.login.clone())
    }

    fn allowed_for(&self, role: Role) -> &[String] {
        self.allow
            .get(&role)
            .or_else(|| self.allow.get(&Role::Usuario))
            .map_or(&[], Vec::as_slice)
    }
}

/// Prefix match for paths: `p` matches `x` iff `p == x` or `p` is a
/// sub-path (`x` followed by `/`).
fn path_matches(path: &str, prefix: &str) -> bool {
    path == prefix
        || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}
