//! Per-stage record shapes a generator must produce.
//!
//! Drafts are what the stage transformer extracts from generator output; the
//! store turns them into entities by assigning IDs, positions and timestamps.
//! Field names follow the generator wire format (`reqId`, `expectedResult`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One RTM record: `{ "reqId": "REQ-001", "description": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RtmDraft {
    #[schemars(length(min = 1))]
    pub req_id: String,
    #[schemars(length(min = 1))]
    pub description: String,
}

/// One scenario record: `{ "title": "...", "steps": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDraft {
    #[schemars(length(min = 1))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schemars(length(min = 1))]
    pub steps: String,
}

/// One test case record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseDraft {
    #[schemars(length(min = 1))]
    pub title: String,
    #[schemars(length(min = 1))]
    pub preconditions: String,
    #[schemars(length(min = 1))]
    pub steps: String,
    #[schemars(length(min = 1))]
    pub expected_result: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rtm_draft_uses_wire_names() {
        let draft: RtmDraft =
            serde_json::from_str(r#"{"reqId":"REQ-001","description":"Login"}"#).unwrap();
        assert_eq!(
            draft,
            RtmDraft {
                req_id: "REQ-001".into(),
                description: "Login".into(),
            }
        );
    }

    #[test]
    fn test_case_draft_uses_wire_names() {
        let json = serde_json::to_value(TestCaseDraft {
            title: "t".into(),
            preconditions: "p".into(),
            steps: "s".into(),
            expected_result: "e".into(),
        })
        .unwrap();
        assert_eq!(json["expectedResult"], "e");
    }

    #[test]
    fn scenario_description_is_optional() {
        let draft: ScenarioDraft =
            serde_json::from_str(r#"{"title":"Login","steps":"1. Go"}"#).unwrap();
        assert_eq!(draft.description, None);
    }
}
