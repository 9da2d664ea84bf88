use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, EventKind};
use crate::errors::CoreError;

/// An immutable record of one mutating event on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    pub actor_id: String,
    pub entity_id: String,
    pub entity_kind: EntityKind,
    pub event_kind: EventKind,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input to the recorder: everything except the assigned id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogEntryDraft {
    pub actor_id: String,
    pub entity_id: String,
    pub entity_kind: EntityKind,
    pub event_kind: EventKind,
    pub message: Option<String>,
}

impl LogEntryDraft {
    #[must_use]
    pub fn new(
        actor_id: impl Into<String>,
        entity_id: impl Into<String>,
        entity_kind: EntityKind,
        event_kind: EventKind,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            entity_id: entity_id.into(),
            entity_kind,
            event_kind,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check the fields the type system cannot: actor and entity ids must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.actor_id.trim().is_empty() {
            return Err(CoreError::Validation("actor_id must not be empty".into()));
        }
        if self.entity_id.trim().is_empty() {
            return Err(CoreError::Validation("entity_id must not be empty".into()));
        }
        Ok(())
    }

    /// Seal the draft into a persisted entry.
    #[must_use]
    pub fn into_entry(self, id: String, created_at: DateTime<Utc>) -> LogEntry {
        LogEntry {
            id,
            actor_id: self.actor_id,
            entity_id: self.entity_id,
            entity_kind: self.entity_kind,
            event_kind: self.event_kind,
            message: self.message,
            created_at,
        }
    }
}

/// A log entry as returned by search: the actor's display name is joined in
/// at read time and is not part of the stored row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogEntryView {
    pub id: String,
    pub actor_name: String,
    pub entity_id: String,
    pub entity_kind: EntityKind,
    pub event_kind: EventKind,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
