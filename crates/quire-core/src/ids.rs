//! ID prefix constants.
//!
//! Every generated ID is `{prefix}-{16 hex chars}`, e.g. `log-3fa8b2c1d09e7a44`.

pub const PREFIX_LOG: &str = "log";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_USER_REQUEST: &str = "urq";

/// All prefixes handed out by the ID generator.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_LOG, PREFIX_USER, PREFIX_USER_REQUEST];
