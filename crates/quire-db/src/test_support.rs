//! Shared test utilities for quire-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{DateTime, Utc};
    use quire_core::entities::{LogEntry, LogEntryDraft};
    use quire_core::enums::{EntityKind, EventKind};

    use crate::QuireDb;
    use crate::helpers::format_datetime;
    use crate::repos::audit_log::append_entry;
    use crate::service::QuireService;

    /// Create an in-memory `QuireService`.
    pub async fn test_service() -> QuireService {
        let db = QuireDb::open_local(":memory:").await.unwrap();
        QuireService::from_db(db)
    }

    /// Seeds platform rows and backdated log entries.
    pub struct Fixture<'a> {
        svc: &'a QuireService,
    }

    impl<'a> Fixture<'a> {
        pub const fn new(svc: &'a QuireService) -> Self {
            Self { svc }
        }

        async fn exec(&self, sql: &str, params: impl libsql::params::IntoParams) {
            self.svc.db().conn().execute(sql, params).await.unwrap();
        }

        pub async fn user(&self, id: &str, username: &str, operator: bool) {
            let role = if operator { "admin" } else { "user" };
            self.exec(
                "INSERT INTO users (id, username, role) VALUES (?1, ?2, ?3)",
                [id, username, role],
            )
            .await;
        }

        pub async fn delete_user(&self, id: &str) {
            self.exec(
                "UPDATE users SET deleted_at = '2026-01-01T00:00:00.000000Z' WHERE id = ?1",
                [id],
            )
            .await;
        }

        pub async fn document(&self, id: &str, title: &str, owner_id: &str) {
            self.exec(
                "INSERT INTO documents (id, title, owner_id) VALUES (?1, ?2, ?3)",
                [id, title, owner_id],
            )
            .await;
        }

        pub async fn delete_document(&self, id: &str) {
            self.exec(
                "UPDATE documents SET deleted_at = '2026-01-01T00:00:00.000000Z' WHERE id = ?1",
                [id],
            )
            .await;
        }

        pub async fn file(&self, id: &str, document_id: &str) {
            self.exec(
                "INSERT INTO files (id, document_id) VALUES (?1, ?2)",
                [id, document_id],
            )
            .await;
        }

        pub async fn comment(&self, id: &str, document_id: &str) {
            self.exec(
                "INSERT INTO comments (id, document_id) VALUES (?1, ?2)",
                [id, document_id],
            )
            .await;
        }

        pub async fn acl(&self, id: &str, document_id: &str, target_id: &str, perm: &str) {
            self.exec(
                "INSERT INTO acl (id, source_id, target_id, perm) VALUES (?1, ?2, ?3, ?4)",
                [id, document_id, target_id, perm],
            )
            .await;
        }

        pub async fn route(&self, id: &str, document_id: &str) {
            self.exec(
                "INSERT INTO routes (id, document_id) VALUES (?1, ?2)",
                [id, document_id],
            )
            .await;
        }

        /// Record through the service with the live clock.
        pub async fn log(
            &self,
            actor_id: &str,
            entity_id: &str,
            kind: EntityKind,
            event: EventKind,
        ) -> LogEntry {
            self.svc
                .record(&LogEntryDraft::new(actor_id, entity_id, kind, event))
                .await
                .unwrap()
        }

        /// Append an entry with an explicit id and timestamp.
        pub async fn log_at(
            &self,
            id: &str,
            actor_id: &str,
            entity_id: &str,
            kind: EntityKind,
            event: EventKind,
            at: DateTime<Utc>,
        ) -> LogEntry {
            let entry = LogEntryDraft::new(actor_id, entity_id, kind, event)
                .into_entry(id.to_string(), at);
            append_entry(self.svc.db().conn(), &entry).await.unwrap();
            entry
        }

        /// Append a row whose kind columns bypass the enums.
        pub async fn raw_log(&self, id: &str, entity_kind: &str, event_kind: &str) {
            let at = format_datetime(&Utc::now());
            self.exec(
                "INSERT INTO audit_log (id, actor_id, entity_id, entity_kind, event_kind, created_at)
                 VALUES (?1, 'usr-x', 'x-1', ?2, ?3, ?4)",
                [id, entity_kind, event_kind, at.as_str()],
            )
            .await;
        }
    }
}
