//! The `Pipeline` façade: every user-facing operation runs through here.

use std::sync::Arc;

use craft_config::CraftConfig;
use craft_core::enums::Stage;
use craft_db::ArtifactStore;
use craft_generator::{ContentGenerator, Role, build_generator};
use craft_schema::SchemaRegistry;

use crate::error::PipelineError;
use crate::locks::ParentLocks;

/// Coordinates the store, the content generator and the output contracts.
///
/// Operations are implemented in `crate::ops`, one module per artifact level.
pub struct Pipeline {
    pub(crate) store: Arc<ArtifactStore>,
    pub(crate) generator: Arc<dyn ContentGenerator>,
    pub(crate) schemas: SchemaRegistry,
    pub(crate) locks: ParentLocks,
}

impl Pipeline {
    #[must_use]
    pub fn new(store: Arc<ArtifactStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            generator,
            schemas: SchemaRegistry::new(),
            locks: ParentLocks::new(),
        }
    }

    /// Open the configured store and build the configured generator.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Store` if the database cannot be opened or
    /// migrated, and `PipelineError::Generator` if the generator backend is
    /// not configured.
    pub async fn from_config(config: &CraftConfig) -> Result<Self, PipelineError> {
        let generator = build_generator(&config.generator)?;
        let store = ArtifactStore::open(&config.storage).await?;
        tracing::info!(
            db_path = %config.storage.db_path,
            generator = generator.name(),
            "pipeline ready"
        );
        Ok(Self::new(Arc::new(store), generator))
    }

    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    #[must_use]
    pub const fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    #[must_use]
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Ask the generator for `stage` output.
    pub(crate) async fn generate(&self, stage: Stage, context: &str) -> Result<String, PipelineError> {
        let role = Role::for_stage(stage);
        tracing::debug!(
            %stage,
            %role,
            generator = self.generator.name(),
            context_len = context.len(),
            "requesting generation"
        );
        let output = self
            .generator
            .generate(role, context)
            .await
            .inspect_err(|e| tracing::warn!(%stage, error = %e, "generation failed"))?;
        Ok(output)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("generator", &self.generator.name())
            .field("schemas", &self.schemas.schema_count())
            .finish_non_exhaustive()
    }
}
