//! Core domain logic for the Lexyvoz session layer.
//!
//! Pure types and state machines shared by the client and application
//! layers. Nothing in this crate performs I/O: the session lifecycle and
//! the route guard are expressed as data and transition functions so they
//! can be tested without a UI runtime or a network.
//!
//! # Components
//!
//! - [`Session`]: authentication lifecycle state machine
//! - [`Role`]: closed role enum parsed from raw backend strings
//! - [`RouteTable`]: per-role route allow-lists and the pure guard
//! - [`UserProfile`]: typed view of the backend user record
//! - [`AuthError`]: error taxonomy for auth and storage failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod guard;
mod role;
mod session;
mod user;

pub use error::AuthError;
pub use guard::{GuardDecision, RouteTable};
pub use role::Role;
pub use session::{Session, SessionStatus};
pub use user::{UserProfile, UserWire};
