use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// Root of the artifact tree. Soft-deleted, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A project status update committed together with a stage's replacement set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChange {
    pub project_id: String,
    pub from: ProjectStatus,
    pub to: ProjectStatus,
}

impl StatusChange {
    /// Whether applying this change actually moves the project.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}
