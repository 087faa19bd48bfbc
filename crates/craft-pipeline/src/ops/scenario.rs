use craft_core::drafts::ScenarioDraft;
use craft_core::entities::TestScenario;
use craft_core::enums::{EntityKind, Stage};

use super::require_id;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::stage;
use crate::workflow::{self, WorkflowEvent};

impl Pipeline {
    /// Replace the scenarios of one RTM item. Moves the project from
    /// `RTM_BUILD` to `TEST_BUILD`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the RTM item is missing, belongs to a deleted project,
    /// or is removed by a DOU rewrite before the replacement commits.
    pub async fn generate_scenarios(
        &self,
        rtm_item_id: &str,
    ) -> Result<Vec<TestScenario>, PipelineError> {
        require_id("rtmItemId", rtm_item_id)?;
        let _lock = self
            .locks
            .acquire(EntityKind::TestScenario, rtm_item_id)
            .await;

        let scoped = self
            .store
            .get_rtm_item(rtm_item_id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::RtmItem, rtm_item_id))?;
        let context = stage::scenario_context(&scoped.item);

        let raw = self.generate(Stage::Scenarios, &context).await?;
        let drafts: Vec<ScenarioDraft> =
            stage::parse_records(Stage::Scenarios, &raw, &self.schemas)?;

        let change = workflow::status_change(&scoped.project, WorkflowEvent::ScenariosGenerated);
        let scenarios = self
            .store
            .replace_scenarios(rtm_item_id, &drafts, change.as_ref())
            .await?;
        tracing::info!(rtm_item_id, count = scenarios.len(), "scenarios generated");
        Ok(scenarios)
    }
}
