use craft_core::drafts::TestCaseDraft;
use craft_core::entities::TestCase;
use craft_core::enums::{EntityKind, Stage};

use super::require_id;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::stage;

impl Pipeline {
    /// Replace the test cases of one scenario. Project status is unchanged.
    ///
    /// # Errors
    ///
    /// `NotFound` if the scenario is missing or was removed by an upstream
    /// regeneration before the replacement commits.
    pub async fn generate_test_cases(
        &self,
        scenario_id: &str,
    ) -> Result<Vec<TestCase>, PipelineError> {
        require_id("scenarioId", scenario_id)?;
        let _lock = self.locks.acquire(EntityKind::TestCase, scenario_id).await;

        let scoped = self
            .store
            .get_scenario(scenario_id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::TestScenario, scenario_id))?;
        let context = stage::test_case_context(&scoped.item);

        let raw = self.generate(Stage::TestCases, &context).await?;
        let drafts: Vec<TestCaseDraft> =
            stage::parse_records(Stage::TestCases, &raw, &self.schemas)?;

        let cases = self.store.replace_test_cases(scenario_id, &drafts).await?;
        tracing::info!(scenario_id, count = cases.len(), "test cases generated");
        Ok(cases)
    }
}
