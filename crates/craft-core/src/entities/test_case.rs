use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub scenario_id: String,
    pub title: String,
    pub preconditions: String,
    pub steps: String,
    pub expected_result: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
