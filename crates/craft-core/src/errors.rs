//! Failure taxonomy for autocraft.
//!
//! Each crate raises its own error enum (`DatabaseError`, `GeneratorError`,
//! `PipelineError`, ...). This module holds the [`ErrorKind`] every failure
//! is finally reported under.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-visible failure category carried in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Request shape or business precondition violated before any mutation.
    InvalidInput,
    /// Referenced entity is absent or soft-deleted.
    NotFound,
    /// A workflow guard was not satisfied.
    PreconditionFailed,
    /// Generator unavailable, generator contract violated, or store failure.
    InternalError,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Default HTTP-style status code for this kind.
    ///
    /// Generator unavailability refines `InternalError` to 503 at the call site.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::PreconditionFailed => 409,
            Self::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
