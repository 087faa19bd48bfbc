//! Central schema registry for all autocraft types.
//!
//! The `SchemaRegistry` builds JSON Schemas from craft-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use craft_core::drafts::{RtmDraft, ScenarioDraft, TestCaseDraft};
use craft_core::enums::Stage;
use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the autocraft system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

/// Registry name of the output contract for a structured stage.
///
/// Text stages (`dou`, `automated_test`) have no schema.
#[must_use]
pub const fn output_schema_name(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Rtm => Some("rtm_output"),
        Stage::Scenarios => Some("scenario_output"),
        Stage::TestCases => Some("test_case_output"),
        Stage::Dou | Stage::AutomatedTest => None,
    }
}

impl SchemaRegistry {
    /// Build a new registry containing all entity, aggregate, response, and
    /// stage-output schemas from craft-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity types (7) ---
        register!(schemas, "project", craft_core::entities::Project);
        register!(schemas, "raw_asset", craft_core::entities::RawAsset);
        register!(schemas, "dou", craft_core::entities::Dou);
        register!(schemas, "rtm_item", craft_core::entities::RtmItem);
        register!(schemas, "test_scenario", craft_core::entities::TestScenario);
        register!(schemas, "test_case", craft_core::entities::TestCase);
        register!(schemas, "automated_test", craft_core::entities::AutomatedTest);

        // --- Aggregate (1) ---
        register!(schemas, "project_tree", craft_core::entities::ProjectTree);

        // --- Response types (2) ---
        register!(schemas, "error_body", craft_core::responses::ErrorBody);
        register!(schemas, "ack", craft_core::responses::Ack);

        // --- Stage outputs (3) ---
        register!(schemas, "rtm_output", Vec<RtmDraft>);
        register!(schemas, "scenario_output", Vec<ScenarioDraft>);
        register!(schemas, "test_case_output", Vec<TestCaseDraft>);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e} at {}", e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate generator output for a structured stage.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for text stages, otherwise the result of
    /// [`Self::validate`].
    pub fn validate_output(
        &self,
        stage: Stage,
        instance: &serde_json::Value,
    ) -> Result<(), SchemaError> {
        let name = output_schema_name(stage)
            .ok_or_else(|| SchemaError::NotFound(format!("{stage}_output")))?;
        self.validate(name, instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
