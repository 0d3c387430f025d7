//! Workspace root package.
//!
//! Exists to host repository-wide dev tooling (git hooks via
//! cargo-husky). All functionality lives in the `crates/` members.
