use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A raw, informally written requirement source. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RawAsset {
    pub id: String,
    pub project_id: String,
    /// Free-form tag, e.g. `Requirement`, `Email`, `Meeting notes`.
    #[serde(rename = "type")]
    pub asset_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
