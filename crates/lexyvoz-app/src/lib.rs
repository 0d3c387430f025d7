//! Application layer for Lexyvoz
//!
//! Pure state machines and a generic runtime for session bootstrap and
//! role-based route guarding, enabling deterministic simulation testing
//! with the same code that runs against a real navigation stack.
//!
//! # Components
//!
//! - [`App`]: navigation state machine (guard enforcement, redirect
//!   de-duplication, auth intents)
//! - [`Bridge`]: session bridge (translates App actions to
//!   `SessionClient` events and queues storage/backend effects)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod runtime;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
