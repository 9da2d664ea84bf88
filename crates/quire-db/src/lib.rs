//! # quire-db
//!
//! libSQL storage for the Quire audit engine.
//!
//! Holds the append-only `audit_log` table and the read-only mirror of the
//! document platform (users, documents and their owned entities). All
//! operations are `impl QuireService` blocks under [`repos`]:
//! recording, scoped search, dashboard aggregation, and user registration
//! requests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod predicates;
pub mod repos;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and one connection. Every operation runs on that
/// connection; a `QuireDb` is injected into the service rather than looked up.
pub struct QuireDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl QuireDb {
    /// Open a local database at the given path. `":memory:"` opens a throwaway store.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let quire_db = Self { db, conn };
        quire_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(quire_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL, e.g. `"log-3fa8b2c1d09e7a44"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16 hex chars, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }
}

/// [`QuireDb::generate_id`] on an arbitrary connection or transaction.
pub(crate) async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(8)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}
