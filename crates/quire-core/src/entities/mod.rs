//! Entity structs for Quire domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema
//! validation.

mod log_entry;
mod user_request;

pub use log_entry::{LogEntry, LogEntryDraft, LogEntryView};
pub use user_request::UserRequest;
