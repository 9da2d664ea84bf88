//! Dashboard response types returned as JSON by `quire dashboard`.
//!
//! The four summaries are computed independently but returned together: a
//! dashboard is either complete or an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, EventKind};

/// Default look-back window for [`ActivityOverTime`], in days.
pub const DEFAULT_ACTIVITY_DAYS: u32 = 30;
/// Default number of documents in the most-active list.
pub const DEFAULT_ACTIVE_DOCUMENTS: u32 = 10;
/// Default number of entries in the recent-activity feed.
pub const DEFAULT_RECENT_ACTIVITY: u32 = 20;

/// Per-actor event counts keyed by UTC calendar date (`YYYY-MM-DD`).
///
/// Outer key is the actor id. Days with no events are absent.
pub type ActivityOverTime = BTreeMap<String, BTreeMap<String, u64>>;

/// Total events per event kind. Kinds with no events are absent.
pub type ActivityByType = BTreeMap<EventKind, u64>;

/// A live document and the number of log entries that resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActiveDocument {
    pub id: String,
    pub title: String,
    pub count: u64,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecentActivity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub actor_id: String,
    pub actor_name: String,
    pub event_kind: EventKind,
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub message: Option<String>,
    /// Title of the target when it is a live document.
    pub document_title: Option<String>,
}

/// Tuning knobs for the dashboard summaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardOptions {
    pub activity_days: u32,
    pub active_documents: u32,
    pub recent_activity: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            activity_days: DEFAULT_ACTIVITY_DAYS,
            active_documents: DEFAULT_ACTIVE_DOCUMENTS,
            recent_activity: DEFAULT_RECENT_ACTIVITY,
        }
    }
}

/// Response from `quire dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Dashboard {
    pub user_activity: ActivityOverTime,
    pub activity_by_type: ActivityByType,
    pub active_documents: Vec<ActiveDocument>,
    pub recent_activity: Vec<RecentActivity>,
}
