//! Repository modules implementing the engine's operations.
//!
//! Each module adds methods to `QuireService` via `impl QuireService` blocks.

pub mod audit_log;
pub mod collaborators;
pub mod dashboard;
pub mod search;
pub mod user_request;
