use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RequestStatus;

/// A self-service registration request awaiting an operator's decision.
///
/// The submitted credential is stored alongside the row but never leaves the
/// database layer, so it is not part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<String>,
}
