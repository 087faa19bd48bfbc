//! Pipeline error type and its mapping onto the user-visible taxonomy.

use craft_core::enums::{EntityKind, Stage};
use craft_core::errors::ErrorKind;
use craft_core::responses::ErrorBody;
use craft_db::error::DatabaseError;
use craft_generator::GeneratorError;
use thiserror::Error;

/// Every way a pipeline operation can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Request shape or business rule violated; nothing was written.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced entity is absent, or belongs to a soft-deleted project.
    #[error("{} not found: {id}", display_kind(.entity))]
    NotFound { entity: EntityKind, id: String },

    /// A workflow guard was not satisfied; nothing was written.
    #[error("{0}")]
    PreconditionFailed(String),

    /// The generator could not produce output.
    #[error("Generator failed: {0}")]
    Generator(#[from] GeneratorError),

    /// The generator answered, but not in the shape the stage requires.
    #[error("Generator output for {stage} is unusable: {reason}")]
    Contract { stage: Stage, reason: String },

    /// Unexpected store failure; the transaction was rolled back.
    #[error("Store failure: {0}")]
    Store(DatabaseError),
}

const fn display_kind(kind: &EntityKind) -> &'static str {
    match kind {
        EntityKind::Project => "Project",
        EntityKind::RawAsset => "Raw asset",
        EntityKind::Dou => "DOU",
        EntityKind::RtmItem => "RTM item",
        EntityKind::TestScenario => "Test scenario",
        EntityKind::TestCase => "Test case",
        EntityKind::AutomatedTest => "Automated test",
    }
}

impl From<DatabaseError> for PipelineError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Store(other),
        }
    }
}

impl PipelineError {
    pub(crate) fn not_found(entity: EntityKind, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn contract(stage: Stage, reason: impl Into<String>) -> Self {
        Self::Contract {
            stage,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::Generator(_) | Self::Contract { .. } | Self::Store(_) => ErrorKind::InternalError,
        }
    }

    /// HTTP-style status: the kind's default, refined to 503 when the
    /// generator was unavailable.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Generator(err) if err.is_unavailable() => 503,
            _ => self.kind().http_status(),
        }
    }

    /// Structured failure payload for the response envelope.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            Self::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity,
                "id": id,
            })),
            Self::Contract { stage, .. } => Some(serde_json::json!({ "stage": stage })),
            Self::Generator(err) => Some(serde_json::json!({
                "transient": err.is_transient(),
            })),
            Self::InvalidInput(_) | Self::PreconditionFailed(_) | Self::Store(_) => None,
        };
        ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
            details,
        }
    }
}
