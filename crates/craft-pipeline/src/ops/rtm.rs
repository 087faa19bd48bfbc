use std::collections::HashSet;

use craft_core::drafts::RtmDraft;
use craft_core::entities::RtmItem;
use craft_core::enums::{EntityKind, Stage};

use super::require_id;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::stage;
use crate::workflow::{self, WorkflowEvent};

impl Pipeline {
    /// Replace the RTM of the project's approved DOU.
    ///
    /// Holds the DOU lock, so a concurrent DOU rewrite or approval waits
    /// until the new RTM set is committed.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing project, `PreconditionFailed` unless the DOU
    /// is approved, and generator or contract errors before anything is
    /// written.
    pub async fn generate_rtm(&self, project_id: &str) -> Result<Vec<RtmItem>, PipelineError> {
        require_id("projectId", project_id)?;
        let _lock = self.locks.acquire(EntityKind::Dou, project_id).await;

        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::Project, project_id))?;
        let dou = workflow::require_approved(self.store.get_dou(project_id).await?)?;

        let raw = self.generate(Stage::Rtm, &dou.content).await?;
        let drafts: Vec<RtmDraft> = stage::parse_records(Stage::Rtm, &raw, &self.schemas)?;
        warn_duplicate_req_ids(&dou.id, &drafts);

        let change = workflow::status_change(&project, WorkflowEvent::RtmGenerated);
        let items = self
            .store
            .replace_rtm_items(&dou.id, &drafts, change.as_ref())
            .await?;
        tracing::info!(project_id, dou_id = %dou.id, count = items.len(), "rtm generated");
        Ok(items)
    }
}

/// Duplicate requirement IDs are kept as generated.
fn warn_duplicate_req_ids(dou_id: &str, drafts: &[RtmDraft]) {
    let mut seen = HashSet::new();
    for draft in drafts {
        if !seen.insert(draft.req_id.as_str()) {
            tracing::warn!(dou_id, req_id = %draft.req_id, "duplicate requirement id in rtm output");
        }
    }
}
