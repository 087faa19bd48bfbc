use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DouStatus;

/// Document of Understanding. At most one per project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Dou {
    pub id: String,
    pub project_id: String,
    /// Markdown, stored verbatim from the generator.
    pub content: String,
    pub status: DouStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
