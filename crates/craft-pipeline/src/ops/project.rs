use craft_core::entities::{Project, ProjectTree, RawAsset};
use craft_core::enums::EntityKind;
use craft_core::responses::Ack;

use super::require_id;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;

pub const MAX_PROJECT_NAME_CHARS: usize = 100;
pub const MIN_ASSET_CONTENT_CHARS: usize = 10;

impl Pipeline {
    /// Create a project in `INGESTION`.
    ///
    /// Surrounding whitespace is stripped before the length check and the
    /// stored name is the stripped one, so a whitespace-only name counts as
    /// blank.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidInput` unless the trimmed name has
    /// 1 to 100 characters.
    pub async fn create_project(&self, name: &str) -> Result<Project, PipelineError> {
        let name = name.trim();
        let chars = name.chars().count();
        if chars == 0 {
            return Err(PipelineError::InvalidInput("Project name is required".into()));
        }
        if chars > MAX_PROJECT_NAME_CHARS {
            return Err(PipelineError::InvalidInput(format!(
                "Project name must be at most {MAX_PROJECT_NAME_CHARS} characters"
            )));
        }
        let project = self.store.create_project(name).await?;
        tracing::info!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Live projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Store` on store failure.
    pub async fn list_projects(&self) -> Result<Vec<Project>, PipelineError> {
        Ok(self.store.list_projects().await?)
    }

    /// The full artifact tree of a live project.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NotFound` if the project is missing or
    /// soft-deleted.
    pub async fn get_project(&self, id: &str) -> Result<ProjectTree, PipelineError> {
        require_id("id", id)?;
        self.store
            .project_tree(id)
            .await?
            .ok_or_else(|| PipelineError::not_found(EntityKind::Project, id))
    }

    /// Hide a project and everything under it from every read.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NotFound` if the project is missing or was
    /// already deleted.
    pub async fn soft_delete_project(&self, id: &str) -> Result<Ack, PipelineError> {
        require_id("id", id)?;
        if !self.store.soft_delete_project(id).await? {
            return Err(PipelineError::not_found(EntityKind::Project, id));
        }
        tracing::info!(project_id = id, "project soft-deleted");
        Ok(Ack {
            id: id.to_string(),
            acknowledged: true,
        })
    }

    /// Append a raw asset to a project. Project status is unchanged.
    ///
    /// The type must contain at least one non-whitespace character but is
    /// stored exactly as given. Content is stored untrimmed and its length is
    /// counted as is.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidInput` for a blank or whitespace-only
    /// type, or content
    /// shorter than 10 characters, and `PipelineError::NotFound` if the
    /// project is missing or soft-deleted.
    pub async fn ingest_asset(
        &self,
        project_id: &str,
        asset_type: &str,
        content: &str,
    ) -> Result<RawAsset, PipelineError> {
        require_id("projectId", project_id)?;
        if asset_type.trim().is_empty() {
            return Err(PipelineError::InvalidInput("Asset type is required".into()));
        }
        if content.chars().count() < MIN_ASSET_CONTENT_CHARS {
            return Err(PipelineError::InvalidInput(format!(
                "Asset content must be at least {MIN_ASSET_CONTENT_CHARS} characters"
            )));
        }
        let asset = self
            .store
            .create_asset(project_id, asset_type, content)
            .await?;
        tracing::info!(project_id, asset_id = %asset.id, asset_type, "asset ingested");
        Ok(asset)
    }
}
