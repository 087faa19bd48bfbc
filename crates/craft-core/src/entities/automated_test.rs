use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generated test source for a test case. At most one per test case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AutomatedTest {
    pub id: String,
    pub test_case_id: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}
