use craft_core::entities::Dou;
use craft_core::enums::{DouStatus, EntityKind, Stage};

use super::require_id;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::stage;
use crate::workflow::{self, WorkflowEvent};

impl Pipeline {
    /// Write the project's DOU from its assets as a fresh `DRAFT`.
    ///
    /// A previous DOU keeps its ID but loses its approval and every RTM
    /// item derived from it. The project returns to `DOU_REVIEW`.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing project, `InvalidInput` when it has no
    /// assets, and generator or contract errors before anything is written.
    pub async fn generate_dou(&self, project_id: &str) -> Result<Dou, PipelineError> {
        require_id("projectId", project_id)?;
        let _lock = self.locks.acquire(EntityKind::Dou, project_id).await;

        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::Project, project_id))?;
        let assets = self.store.list_assets(project_id).await?;
        let context = stage::dou_context(&assets)?;

        let content = self.generate(Stage::Dou, &context).await?;
        stage::require_text(Stage::Dou, &content)?;

        let change = workflow::status_change(&project, WorkflowEvent::DouGenerated);
        let dou = self
            .store
            .upsert_dou(project_id, &content, change.as_ref())
            .await?;
        tracing::info!(project_id, dou_id = %dou.id, assets = assets.len(), "dou generated");
        Ok(dou)
    }

    /// Approve the project's DOU. `status` must be the literal `APPROVED`.
    ///
    /// Approving an approved DOU is a no-op success.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for any other status, `NotFound` for a missing project
    /// or a project without a DOU.
    pub async fn approve_dou(&self, project_id: &str, status: &str) -> Result<Dou, PipelineError> {
        require_id("projectId", project_id)?;
        if status != DouStatus::Approved.as_str() {
            return Err(PipelineError::InvalidInput(format!(
                "Unsupported DOU status '{status}'; only {} is accepted",
                DouStatus::Approved
            )));
        }
        let _lock = self.locks.acquire(EntityKind::Dou, project_id).await;

        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::Project, project_id))?;
        let change = workflow::status_change(&project, WorkflowEvent::DouApproved);
        let dou = self
            .store
            .set_dou_status(project_id, DouStatus::Approved, change.as_ref())
            .await?;
        tracing::info!(project_id, dou_id = %dou.id, "dou approved");
        Ok(dou)
    }
}
