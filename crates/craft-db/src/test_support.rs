//! Shared test utilities for craft-db unit tests.

pub(crate) mod helpers {
    use craft_core::drafts::{RtmDraft, ScenarioDraft, TestCaseDraft};
    use craft_core::entities::{Dou, Project, RtmItem, TestCase, TestScenario};
    use craft_core::enums::DouStatus;

    use crate::store::ArtifactStore;

    /// Create an in-memory store.
    pub async fn test_store() -> ArtifactStore {
        ArtifactStore::open_local(":memory:").await.unwrap()
    }

    pub fn rtm_drafts(n: usize) -> Vec<RtmDraft> {
        (1..=n)
            .map(|i| RtmDraft {
                req_id: format!("REQ-{i:03}"),
                description: format!("Requirement {i}"),
            })
            .collect()
    }

    pub fn scenario_drafts(n: usize) -> Vec<ScenarioDraft> {
        (1..=n)
            .map(|i| ScenarioDraft {
                title: format!("Scenario {i}"),
                description: None,
                steps: format!("1. Step for scenario {i}"),
            })
            .collect()
    }

    pub fn case_drafts(n: usize) -> Vec<TestCaseDraft> {
        (1..=n)
            .map(|i| TestCaseDraft {
                title: format!("Case {i}"),
                preconditions: "User exists".into(),
                steps: format!("1. Do thing {i}"),
                expected_result: "It works".into(),
            })
            .collect()
    }

    /// A project with an approved DOU.
    pub async fn approved_dou(store: &ArtifactStore) -> (Project, Dou) {
        let project = store.create_project("Acme").await.unwrap();
        store.upsert_dou(&project.id, "# DOU", None).await.unwrap();
        let dou = store
            .set_dou_status(&project.id, DouStatus::Approved, None)
            .await
            .unwrap();
        (project, dou)
    }

    /// A project with one RTM item.
    pub async fn rtm_item(store: &ArtifactStore) -> (Project, RtmItem) {
        let (project, dou) = approved_dou(store).await;
        let mut items = store
            .replace_rtm_items(&dou.id, &rtm_drafts(1), None)
            .await
            .unwrap();
        (project, items.remove(0))
    }

    /// A project with one scenario.
    pub async fn scenario(store: &ArtifactStore) -> (Project, TestScenario) {
        let (project, item) = rtm_item(store).await;
        let mut scenarios = store
            .replace_scenarios(&item.id, &scenario_drafts(1), None)
            .await
            .unwrap();
        (project, scenarios.remove(0))
    }

    /// One test case under a fresh project.
    pub async fn test_case(store: &ArtifactStore) -> TestCase {
        let (_, scenario) = scenario(store).await;
        let mut cases = store
            .replace_test_cases(&scenario.id, &case_drafts(1))
            .await
            .unwrap();
        cases.remove(0)
    }
}
