//! Deterministic simulation harness for Lexyvoz session testing.
//!
//! In-memory implementations of the storage, backend, and driver
//! boundaries so the same [`lexyvoz_app::Runtime`] orchestration code
//! runs in production and in deterministic tests.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution
//! paths, not specific scenarios. Use [`InvariantRegistry::standard()`]
//! for the common guard/session invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod memory_store;
pub mod sim_backend;
pub mod sim_driver;

pub use invariants::{
    AuthenticatedRoleResolved, GuardStability, Invariant, InvariantRegistry, InvariantResult,
    SessionSnapshot, Violation,
};
pub use memory_store::MemoryStore;
pub use sim_backend::SimBackend;
pub use sim_driver::{SimDriver, SimDriverError, SimHandle};
