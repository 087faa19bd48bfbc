use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One requirement extracted from the DOU.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RtmItem {
    pub id: String,
    pub dou_id: String,
    /// Generator-supplied identifier such as `REQ-001`. Not guaranteed unique.
    pub req_id: String,
    pub description: String,
    /// Zero-based position in the generator's output.
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
