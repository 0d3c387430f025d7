//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during system
//! execution. Unlike example-based tests that check specific scenarios,
//! invariants verify behavioral properties across all possible execution
//! paths.
//!
//! The snapshot is extracted from [`lexyvoz_app::App`] after every
//! processed event, then registered [`Invariant`] checks run against it.

use lexyvoz_app::App;
use lexyvoz_core::{GuardDecision, Role, RouteTable, SessionStatus};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Observable session/guard state extracted from the App.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Session status as the App observes it.
    pub status: SessionStatus,
    /// Normalized role, if resolved.
    pub role: Option<Role>,
    /// Current path (optimistically the redirect target while one is in
    /// flight).
    pub path: String,
    /// Whether a redirect is executing.
    pub redirect_in_flight: bool,
}

impl SessionSnapshot {
    /// Extract a snapshot from the App.
    pub fn from_app(app: &App) -> Self {
        Self {
            status: app.status(),
            role: app.role(),
            path: app.path().to_owned(),
            redirect_in_flight: app.redirect_in_flight(),
        }
    }
}

/// An invariant that can be checked against system state.
///
/// Invariants are behavioral properties that must always hold. They
/// capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    fn check(&self, snapshot: &SessionSnapshot) -> InvariantResult;
}

/// When no redirect is in flight, the current path must be permitted by
/// the guard for the observed session. A settled state that still denies
/// its own path means a redirect was lost or looped.
pub struct GuardStability {
    routes: RouteTable,
}

impl Default for GuardStability {
    fn default() -> Self {
        Self { routes: RouteTable::lexyvoz() }
    }
}

impl GuardStability {
    /// Check against a specific route table.
    pub fn with_routes(routes: RouteTable) -> Self {
        Self { routes }
    }
}

impl Invariant for GuardStability {
    fn name(&self) -> &'static str {
        "guard_stability"
    }

    fn check(&self, snapshot: &SessionSnapshot) -> InvariantResult {
        if snapshot.redirect_in_flight {
            return Ok(());
        }
        match self.routes.evaluate(snapshot.status, snapshot.role, &snapshot.path) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Redirect { to } => Err(Violation {
                invariant: self.name(),
                message: format!(
                    "settled on denied path {:?} (would redirect to {to:?}) with status {:?}",
                    snapshot.path, snapshot.status
                ),
            }),
        }
    }
}

/// An authenticated session always has a resolved role: the session
/// machine guarantees a user profile is held, and every profile
/// normalizes to a role.
pub struct AuthenticatedRoleResolved;

impl Invariant for AuthenticatedRoleResolved {
    fn name(&self) -> &'static str {
        "authenticated_role_resolved"
    }

    fn check(&self, snapshot: &SessionSnapshot) -> InvariantResult {
        if snapshot.status == SessionStatus::Authenticated && snapshot.role.is_none() {
            return Err(Violation {
                invariant: self.name(),
                message: "authenticated session with unresolved role".into(),
            });
        }
        Ok(())
    }
}

/// Registry of invariants checked together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry with the standard guard/session invariants.
    pub fn standard() -> Self {
        Self::new().with(GuardStability::default()).with(AuthenticatedRoleResolved)
    }

    /// Add an invariant.
    #[must_use]
    pub fn with(mut self, invariant: impl Invariant + 'static) -> Self {
        self.invariants.push(Box::new(invariant));
        self
    }

    /// Check all registered invariants, failing on the first violation.
    pub fn check_all(&self, snapshot: &SessionSnapshot) -> InvariantResult {
        for invariant in &self.invariants {
            invariant.check(snapshot)?;
        }
        Ok(())
    }
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
