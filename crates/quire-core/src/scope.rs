//! Search scopes and their resolution into typed predicates.
//!
//! A log row only carries a raw `(entity_id, entity_kind)` pair. Finding
//! "everything under document X" means following each ownership path (file,
//! comment, access entry, route) back to its document. [`SearchScope::resolve`]
//! expresses that as a set of independent [`SubQuery`] predicates whose union
//! is the result set. The database layer lowers them to SQL; [`SubQuery::matches`]
//! evaluates them in-process against an ownership lookup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::LogEntry;
use crate::enums::{EntityKind, OwnedKind};

/// The logical target of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum SearchScope {
    /// Every event touching one document, directly or through an owned entity.
    /// The caller has already checked that the reader may see this document.
    ByDocument { document_id: String },
    /// Events caused by one actor, or every event when the actor is an operator.
    ByActor { actor_id: String, is_operator: bool },
}

impl SearchScope {
    #[must_use]
    pub fn document(document_id: impl Into<String>) -> Self {
        Self::ByDocument {
            document_id: document_id.into(),
        }
    }

    #[must_use]
    pub fn actor(actor_id: impl Into<String>, is_operator: bool) -> Self {
        Self::ByActor {
            actor_id: actor_id.into(),
            is_operator,
        }
    }

    /// Resolve this scope into predicates combined by union.
    ///
    /// Access-control entries are never visible through an actor scope, not
    /// even to operators or on the actor's own items.
    ///
    /// A scope with a blank target resolves to no predicates at all; callers
    /// must treat that as an empty result, never as "no filter".
    #[must_use]
    pub fn resolve(&self) -> Vec<SubQuery> {
        match self {
            Self::ByDocument { document_id } => {
                if document_id.trim().is_empty() {
                    return Vec::new();
                }
                let mut predicates = Vec::with_capacity(1 + OwnedKind::ALL.len());
                predicates.push(SubQuery::EntityIs {
                    kind: EntityKind::Document,
                    entity_id: document_id.clone(),
                });
                predicates.extend(OwnedKind::ALL.into_iter().map(|kind| SubQuery::OwnedBy {
                    kind,
                    document_id: document_id.clone(),
                }));
                predicates
            }
            Self::ByActor {
                actor_id,
                is_operator,
            } => {
                if actor_id.trim().is_empty() {
                    return Vec::new();
                }
                if *is_operator {
                    vec![SubQuery::AllExcept {
                        kind: EntityKind::AccessEntry,
                    }]
                } else {
                    vec![SubQuery::ActorExcept {
                        actor_id: actor_id.clone(),
                        kind: EntityKind::AccessEntry,
                    }]
                }
            }
        }
    }
}

/// One independent filter over log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum SubQuery {
    /// `entity_kind = kind AND entity_id = entity_id`.
    EntityIs {
        kind: EntityKind,
        entity_id: String,
    },
    /// `entity_kind = kind AND entity_id IN (ids of that kind owned by document_id)`.
    OwnedBy {
        kind: OwnedKind,
        document_id: String,
    },
    /// `entity_kind <> kind`.
    AllExcept { kind: EntityKind },
    /// `actor_id = actor_id AND entity_kind <> kind`.
    ActorExcept { actor_id: String, kind: EntityKind },
}

impl SubQuery {
    /// Evaluate the predicate against one entry.
    ///
    /// `owner_of` answers the ownership relation: which document owns the
    /// entity with this id and kind, if any.
    pub fn matches<F>(&self, entry: &LogEntry, owner_of: F) -> bool
    where
        F: Fn(OwnedKind, &str) -> Option<String>,
    {
        match self {
            Self::EntityIs { kind, entity_id } => {
                entry.entity_kind == *kind && entry.entity_id == *entity_id
            }
            Self::OwnedBy { kind, document_id } => {
                entry.entity_kind == kind.entity_kind()
                    && owner_of(*kind, &entry.entity_id).as_deref() == Some(document_id.as_str())
            }
            Self::AllExcept { kind } => entry.entity_kind != *kind,
            Self::ActorExcept { actor_id, kind } => {
                entry.actor_id == *actor_id && entry.entity_kind != *kind
            }
        }
    }
}

/// Whether `entry` belongs to the union of `predicates`. An empty set matches nothing.
pub fn any_matches<F>(predicates: &[SubQuery], entry: &LogEntry, owner_of: F) -> bool
where
    F: Fn(OwnedKind, &str) -> Option<String>,
{
    predicates
        .iter()
        .any(|predicate| predicate.matches(entry, &owner_of))
}
