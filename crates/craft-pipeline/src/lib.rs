//! # craft-pipeline
//!
//! Turns raw project assets into a traceable tree of QA artifacts, one stage
//! at a time:
//!
//! ```text
//! assets → DOU → (approve) → RTM items → scenarios → test cases → automated test
//! ```
//!
//! Each generation stage builds a context from its parent, asks the
//! [`ContentGenerator`](craft_generator::ContentGenerator) for output, checks
//! the output against the stage contract, and then replaces the parent's
//! whole child set in one store transaction. A failure at any point before
//! the commit leaves every stored artifact as it was.
//!
//! Project status moves with the work:
//! `INGESTION → DOU_REVIEW → RTM_BUILD → TEST_BUILD`, and back to
//! `DOU_REVIEW` whenever the DOU is regenerated.

mod error;
mod locks;
mod ops;
mod pipeline;
pub mod stage;
pub mod workflow;

use craft_core::responses::Envelope;

pub use error::PipelineError;
pub use locks::{ParentGuard, ParentLocks};
pub use ops::{MAX_PROJECT_NAME_CHARS, MIN_ASSET_CONTENT_CHARS};
pub use pipeline::Pipeline;

/// Wrap an operation result in the uniform response envelope.
#[must_use]
pub fn respond<T>(result: Result<T, PipelineError>) -> Envelope<T> {
    match result {
        Ok(data) => Envelope::ok(data),
        Err(err) => Envelope::err(err.to_body()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::errors::ErrorKind;

    #[test]
    fn respond_wraps_both_sides() {
        let ok = respond::<u8>(Ok(1));
        assert!(ok.success);
        assert_eq!(ok.data, Some(1));

        let err = respond::<u8>(Err(PipelineError::InvalidInput("bad".into())));
        assert!(!err.success);
        assert_eq!(err.error.map(|e| e.kind), Some(ErrorKind::InvalidInput));
    }
}
