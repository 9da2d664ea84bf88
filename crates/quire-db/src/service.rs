//! Service layer over the log store.
//!
//! `QuireService` wraps `QuireDb` (raw database access) and the process
//! clock. All repo methods are implemented as `impl QuireService` blocks.

use quire_core::clock::MonotonicClock;

use crate::QuireDb;
use crate::error::DatabaseError;

/// Entry point for recording, searching, and aggregating log entries.
pub struct QuireService {
    db: QuireDb,
    clock: MonotonicClock,
}

impl QuireService {
    /// Create a new service wrapping a local database.
    ///
    /// `db_path` is the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = QuireDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `QuireDb`.
    #[must_use]
    pub fn from_db(db: QuireDb) -> Self {
        Self {
            db,
            clock: MonotonicClock::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QuireDb {
        &self.db
    }

    /// The clock that stamps new entries.
    #[must_use]
    pub const fn clock(&self) -> &MonotonicClock {
        &self.clock
    }
}
