//! Read-side aggregate of a project and all of its descendants.
//!
//! Children at every level are ordered by creation order (generator output
//! order for generated artifacts).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AutomatedTest, Dou, Project, RawAsset, RtmItem, TestCase, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectTree {
    #[serde(flatten)]
    pub project: Project,
    pub assets: Vec<RawAsset>,
    pub dou: Option<DouNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DouNode {
    #[serde(flatten)]
    pub dou: Dou,
    pub rtm_items: Vec<RtmItemNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RtmItemNode {
    #[serde(flatten)]
    pub item: RtmItem,
    pub scenarios: Vec<ScenarioNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScenarioNode {
    #[serde(flatten)]
    pub scenario: TestScenario,
    pub test_cases: Vec<TestCaseNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TestCaseNode {
    #[serde(flatten)]
    pub case: TestCase,
    pub automated_test: Option<AutomatedTest>,
}

impl ProjectTree {
    /// Total number of generated artifacts below the project (DOU included).
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        let Some(dou) = &self.dou else {
            return 0;
        };
        let mut count = 1;
        for item in &dou.rtm_items {
            count += 1;
            for scenario in &item.scenarios {
                count += 1;
                for case in &scenario.test_cases {
                    count += 1 + usize::from(case.automated_test.is_some());
                }
            }
        }
        count
    }

    /// Find an RTM item node by ID.
    #[must_use]
    pub fn rtm_item(&self, id: &str) -> Option<&RtmItemNode> {
        self.dou
            .as_ref()?
            .rtm_items
            .iter()
            .find(|node| node.item.id == id)
    }
}
