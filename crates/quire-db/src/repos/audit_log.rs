//! Log recorder.
//!
//! Append-only: this module inserts entries and reads single entries back.
//! Nothing in the crate updates or deletes an `audit_log` row, and the table's
//! triggers abort any statement that tries.

use quire_core::entities::{LogEntry, LogEntryDraft};
use quire_core::errors::CoreError;
use quire_core::ids::PREFIX_LOG;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{format_datetime, parse_datetime, parse_enum};
use crate::service::QuireService;

pub(crate) const SELECT_COLS: &str =
    "id, actor_id, entity_id, entity_kind, event_kind, message, created_at";

fn row_to_entry(row: &libsql::Row) -> Result<LogEntry, DatabaseError> {
    Ok(LogEntry {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        entity_id: row.get(2)?,
        entity_kind: parse_enum(&row.get::<String>(3)?)?,
        event_kind: parse_enum(&row.get::<String>(4)?)?,
        message: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Insert a fully formed entry on `conn`.
///
/// Takes any connection so callers can record inside their own transaction.
///
/// # Errors
///
/// Returns `DatabaseError` if the INSERT fails (including a duplicate id).
pub async fn append_entry(conn: &libsql::Connection, entry: &LogEntry) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO audit_log ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            entry.id.as_str(),
            entry.actor_id.as_str(),
            entry.entity_id.as_str(),
            entry.entity_kind.as_str(),
            entry.event_kind.as_str(),
            entry.message.as_deref(),
            format_datetime(&entry.created_at)
        ],
    )
    .await?;
    tracing::debug!(
        id = %entry.id,
        actor = %entry.actor_id,
        entity = %entry.entity_id,
        kind = %entry.entity_kind,
        event = %entry.event_kind,
        "appended log entry"
    );
    Ok(())
}

impl QuireService {
    /// Append one entry for `draft`, stamped with a fresh id and the process clock.
    ///
    /// The entity is not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` for an empty actor or entity id, and
    /// propagates store failures without retrying.
    pub async fn record(&self, draft: &LogEntryDraft) -> Result<LogEntry, DatabaseError> {
        self.record_in(self.db().conn(), draft).await
    }

    /// [`Self::record`] on a caller-provided connection, typically a
    /// `libsql::Transaction` holding the mutation being recorded.
    ///
    /// # Errors
    ///
    /// Same as [`Self::record`].
    pub async fn record_in(
        &self,
        conn: &libsql::Connection,
        draft: &LogEntryDraft,
    ) -> Result<LogEntry, DatabaseError> {
        draft.validate()?;
        let id = generate_id_on(conn, PREFIX_LOG).await?;
        let entry = draft.clone().into_entry(id, self.clock().now());
        append_entry(conn, &entry).await?;
        Ok(entry)
    }

    /// Fetch one stored entry by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (as `DatabaseError::Core`) when no entry
    /// has this id, or `DatabaseError::Decode` when the row is corrupt.
    pub async fn get_entry(&self, id: &str) -> Result<LogEntry, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM audit_log WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| CoreError::NotFound {
            entity_type: "log entry".into(),
            id: id.to_string(),
        })?;
        row_to_entry(&row)
    }
}
