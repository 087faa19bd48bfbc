//! Project workflow: which stage events move the project, and the guards a
//! stage must pass before it runs.
//!
//! Progress is monotonic except for DOU regeneration, which sends the
//! project back to `DOU_REVIEW`. An event whose target the project cannot
//! reach from its current status leaves the status unchanged.

use craft_core::entities::{Dou, Project, StatusChange};
use craft_core::enums::{DouStatus, ProjectStatus};

use crate::error::PipelineError;

/// Something that happened to a project's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    DouGenerated,
    DouApproved,
    RtmGenerated,
    ScenariosGenerated,
    TestCasesGenerated,
    AutomatedTestGenerated,
}

impl WorkflowEvent {
    /// Status the event moves the project to, if any.
    #[must_use]
    pub const fn target(self) -> Option<ProjectStatus> {
        match self {
            Self::DouGenerated => Some(ProjectStatus::DouReview),
            Self::DouApproved => Some(ProjectStatus::RtmBuild),
            Self::ScenariosGenerated => Some(ProjectStatus::TestBuild),
            Self::RtmGenerated | Self::TestCasesGenerated | Self::AutomatedTestGenerated => None,
        }
    }
}

/// The status change `event` causes for `project`, or `None` when the
/// project stays where it is.
#[must_use]
pub fn status_change(project: &Project, event: WorkflowEvent) -> Option<StatusChange> {
    let target = event.target()?;
    if target == project.status {
        return None;
    }
    if !project.status.can_transition_to(target) {
        tracing::debug!(
            project_id = %project.id,
            status = %project.status,
            ?event,
            "event does not move project"
        );
        return None;
    }
    Some(StatusChange {
        project_id: project.id.clone(),
        from: project.status,
        to: target,
    })
}

/// RTM generation requires an approved DOU.
///
/// # Errors
///
/// Returns `PipelineError::PreconditionFailed` if the project has no DOU or
/// its DOU is still a draft.
pub fn require_approved(dou: Option<Dou>) -> Result<Dou, PipelineError> {
    match dou {
        Some(dou) if dou.status == DouStatus::Approved => Ok(dou),
        _ => Err(PipelineError::PreconditionFailed(
            "DOU must be approved before generating RTM".into(),
        )),
    }
}
