//! Pipeline operations, grouped by the artifact level they act on.
//!
//! Every operation validates its input before touching the store. Generation
//! operations hold the parent lock for the child set they replace from the
//! moment they read the parent until the replacement is committed.

mod dou;
mod project;
mod rtm;
mod scenario;
mod test_case;

pub use project::{MAX_PROJECT_NAME_CHARS, MIN_ASSET_CONTENT_CHARS};

use crate::error::PipelineError;

/// Reject blank identifiers.
fn require_id(field: &str, value: &str) -> Result<(), PipelineError> {
    if value.trim().is_empty() {
        return Err(PipelineError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
