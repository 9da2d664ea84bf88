//! Read-only views of the document platform.
//!
//! The engine never writes to these tables. They answer ownership (which
//! document an entity belongs to), permission (may an actor read a document's
//! events), and presentation (display names, titles) questions.

use quire_core::enums::{EntityKind, OwnedKind};

use crate::error::DatabaseError;
use crate::predicates::owner_source;
use crate::service::QuireService;

/// Role string that grants operator rights.
pub const OPERATOR_ROLE: &str = "admin";

impl QuireService {
    /// The document owning `entity_id` of `kind`, if any.
    ///
    /// A document owns itself. Kinds without an ownership path return `None`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn document_owner_of(
        &self,
        entity_id: &str,
        kind: EntityKind,
    ) -> Result<Option<String>, DatabaseError> {
        if !kind.resolves_to_document() {
            return Ok(None);
        }
        let sql = kind.owned_kind().map_or_else(
            || "SELECT id FROM documents WHERE id = ?1".to_string(),
            |owned| {
                let (table, column) = owner_source(owned);
                format!("SELECT {column} FROM {table} WHERE id = ?1")
            },
        );
        let mut rows = self.db().conn().query(&sql, [entity_id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Ids of the entities of `kind` owned by `document_id`, sorted.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn owned_ids(
        &self,
        kind: OwnedKind,
        document_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let (table, column) = owner_source(kind);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT id FROM {table} WHERE {column} = ?1 ORDER BY id"),
                [document_id],
            )
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    /// Files attached to `document_id`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn files_of(&self, document_id: &str) -> Result<Vec<String>, DatabaseError> {
        self.owned_ids(OwnedKind::File, document_id).await
    }

    /// Comments attached to `document_id`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn comments_of(&self, document_id: &str) -> Result<Vec<String>, DatabaseError> {
        self.owned_ids(OwnedKind::Comment, document_id).await
    }

    /// Access entries attached to `document_id`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn access_entries_of(
        &self,
        document_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.owned_ids(OwnedKind::AccessEntry, document_id).await
    }

    /// Routes attached to `document_id`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn routes_of(&self, document_id: &str) -> Result<Vec<String>, DatabaseError> {
        self.owned_ids(OwnedKind::Route, document_id).await
    }

    /// Whether `actor_id` may list the events of `document_id`.
    ///
    /// Granted to operators, the document's owner, and principals holding a
    /// READ access entry on it. Deleted or unknown documents are never readable.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn can_read_document_events(
        &self,
        actor_id: &str,
        document_id: &str,
    ) -> Result<bool, DatabaseError> {
        if actor_id.trim().is_empty() || !self.is_document_live(document_id).await? {
            return Ok(false);
        }
        if self.is_operator(actor_id).await? {
            return Ok(true);
        }
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM documents d
                 WHERE d.id = ?1 AND d.owner_id = ?2
                 UNION ALL
                 SELECT 1 FROM acl a
                 WHERE a.source_id = ?1 AND a.target_id = ?2 AND a.perm = 'READ'
                 LIMIT 1",
                [document_id, actor_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Username of `actor_id`, including users that have since been deleted.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn display_name_of(&self, actor_id: &str) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT username FROM users WHERE id = ?1", [actor_id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Whether `actor_id` is an active user holding the operator role.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn is_operator(&self, actor_id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM users WHERE id = ?1 AND role = ?2 AND deleted_at IS NULL",
                [actor_id, OPERATOR_ROLE],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Whether `document_id` exists and is not deleted.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn is_document_live(&self, document_id: &str) -> Result<bool, DatabaseError> {
        Ok(self.title_of(document_id).await?.is_some())
    }

    /// Title of a live document.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn title_of(&self, document_id: &str) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT title FROM documents WHERE id = ?1 AND deleted_at IS NULL",
                [document_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }
}
