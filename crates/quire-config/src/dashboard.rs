//! Dashboard window and list sizes.

use quire_core::responses::{
    DEFAULT_ACTIVE_DOCUMENTS, DEFAULT_ACTIVITY_DAYS, DEFAULT_RECENT_ACTIVITY, DashboardOptions,
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_activity_days() -> u32 {
    DEFAULT_ACTIVITY_DAYS
}

const fn default_active_documents() -> u32 {
    DEFAULT_ACTIVE_DOCUMENTS
}

const fn default_recent_activity() -> u32 {
    DEFAULT_RECENT_ACTIVITY
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Look-back window for the per-actor histogram, in days.
    #[serde(default = "default_activity_days")]
    pub activity_days: u32,

    #[serde(default = "default_active_documents")]
    pub active_documents: u32,

    #[serde(default = "default_recent_activity")]
    pub recent_activity: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            activity_days: default_activity_days(),
            active_documents: default_active_documents(),
            recent_activity: default_recent_activity(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub const fn options(&self) -> DashboardOptions {
        DashboardOptions {
            activity_days: self.activity_days,
            active_documents: self.active_documents,
            recent_activity: self.recent_activity,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.activity_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.activity_days".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
