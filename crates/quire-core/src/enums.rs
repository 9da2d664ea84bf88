//! Entity kinds, event kinds, sort columns, and request status for Quire.
//!
//! Stored string forms match what the document platform has always written
//! into its log table (`Document`, `Acl`, `CREATE`, ...), so every enum carries
//! an explicit `as_str()` and serde renames that agree with it. Decoding a
//! stored value goes through serde; an unknown string is an integrity error,
//! never a default.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of entity a log entry describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum EntityKind {
    Document,
    File,
    Comment,
    /// Access-control entry on a document.
    #[serde(rename = "Acl")]
    AccessEntry,
    Group,
    Tag,
    User,
    RouteModel,
    Route,
}

impl EntityKind {
    pub const ALL: [Self; 9] = [
        Self::Document,
        Self::File,
        Self::Comment,
        Self::AccessEntry,
        Self::Group,
        Self::Tag,
        Self::User,
        Self::RouteModel,
        Self::Route,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::File => "File",
            Self::Comment => "Comment",
            Self::AccessEntry => "Acl",
            Self::Group => "Group",
            Self::Tag => "Tag",
            Self::User => "User",
            Self::RouteModel => "RouteModel",
            Self::Route => "Route",
        }
    }

    /// The ownership path leading from this kind back to a document, if any.
    ///
    /// `Document` itself is the identity path and returns `None` here, as do
    /// the kinds that never belong to a document.
    #[must_use]
    pub const fn owned_kind(self) -> Option<OwnedKind> {
        match self {
            Self::File => Some(OwnedKind::File),
            Self::Comment => Some(OwnedKind::Comment),
            Self::AccessEntry => Some(OwnedKind::AccessEntry),
            Self::Route => Some(OwnedKind::Route),
            Self::Document | Self::Group | Self::Tag | Self::User | Self::RouteModel => None,
        }
    }

    /// Whether entries of this kind can appear in a document-scoped search.
    #[must_use]
    pub const fn resolves_to_document(self) -> bool {
        matches!(self, Self::Document) || self.owned_kind().is_some()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OwnedKind
// ---------------------------------------------------------------------------

/// Entity kinds owned by a document through a parent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OwnedKind {
    File,
    Comment,
    #[serde(rename = "Acl")]
    AccessEntry,
    Route,
}

impl OwnedKind {
    pub const ALL: [Self; 4] = [Self::File, Self::Comment, Self::AccessEntry, Self::Route];

    #[must_use]
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            Self::File => EntityKind::File,
            Self::Comment => EntityKind::Comment,
            Self::AccessEntry => EntityKind::AccessEntry,
            Self::Route => EntityKind::Route,
        }
    }
}

impl fmt::Display for OwnedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_kind().as_str())
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Kind of mutation recorded by a log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortColumn
// ---------------------------------------------------------------------------

/// Column a search result page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    CreatedAt,
    Actor,
    EntityId,
    EntityKind,
    EventKind,
}

impl SortColumn {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Actor => "actor",
            Self::EntityId => "entity_id",
            Self::EntityKind => "entity_kind",
            Self::EventKind => "event_kind",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Status of a user registration request.
///
/// ```text
/// pending → approved
///         → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(entity_document, EntityKind, EntityKind::Document, "Document");
    test_serde_roundtrip!(entity_acl, EntityKind, EntityKind::AccessEntry, "Acl");
    test_serde_roundtrip!(
        entity_route_model,
        EntityKind,
        EntityKind::RouteModel,
        "RouteModel"
    );
    test_serde_roundtrip!(owned_acl, OwnedKind, OwnedKind::AccessEntry, "Acl");
    test_serde_roundtrip!(event_create, EventKind, EventKind::Create, "CREATE");
    test_serde_roundtrip!(event_delete, EventKind, EventKind::Delete, "DELETE");
    test_serde_roundtrip!(
        sort_entity_kind,
        SortColumn,
        SortColumn::EntityKind,
        "entity_kind"
    );
    test_serde_roundtrip!(
        request_pending,
        RequestStatus,
        RequestStatus::Pending,
        "PENDING"
    );

    #[test]
    fn as_str_agrees_with_serde_for_every_entity_kind() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn unknown_entity_kind_is_rejected() {
        let parsed = serde_json::from_str::<EntityKind>("\"Folder\"");
        assert!(parsed.is_err());
        // Variant names are not accepted where a rename exists.
        assert!(serde_json::from_str::<EntityKind>("\"AccessEntry\"").is_err());
    }

    #[test]
    fn unknown_event_kind_is_rejected() {
        assert!(serde_json::from_str::<EventKind>("\"ARCHIVE\"").is_err());
        assert!(serde_json::from_str::<EventKind>("\"create\"").is_err());
    }

    #[test]
    fn ownership_paths() {
        assert_eq!(EntityKind::File.owned_kind(), Some(OwnedKind::File));
        assert_eq!(EntityKind::AccessEntry.owned_kind(), Some(OwnedKind::AccessEntry));
        assert_eq!(EntityKind::Document.owned_kind(), None);
        assert_eq!(EntityKind::RouteModel.owned_kind(), None);

        let resolvable: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|kind| kind.resolves_to_document())
            .collect();
        assert_eq!(
            resolvable,
            vec![
                EntityKind::Document,
                EntityKind::File,
                EntityKind::Comment,
                EntityKind::AccessEntry,
                EntityKind::Route,
            ]
        );
    }

    #[test]
    fn owned_kind_maps_back() {
        for owned in OwnedKind::ALL {
            assert_eq!(owned.entity_kind().owned_kind(), Some(owned));
        }
    }

    #[test]
    fn request_valid_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn request_terminal_states() {
        assert!(RequestStatus::Approved.allowed_next_states().is_empty());
        assert!(RequestStatus::Rejected.allowed_next_states().is_empty());
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::AccessEntry), "Acl");
        assert_eq!(format!("{}", OwnedKind::Route), "Route");
        assert_eq!(format!("{}", EventKind::Update), "UPDATE");
        assert_eq!(format!("{}", SortColumn::CreatedAt), "created_at");
        assert_eq!(format!("{}", RequestStatus::Approved), "APPROVED");
    }
}
