//! # craft-generator
//!
//! The content generator capability used by every pipeline stage.
//!
//! A generator receives a [`Role`] (which fixes the system instruction and so
//! the expected output shape) and the stage context, and returns text. Two
//! backends exist:
//! - [`OpenAiGenerator`]: an OpenAI-compatible chat completion endpoint
//! - [`FixtureGenerator`]: deterministic offline output
//!
//! [`build_generator`] selects the backend from configuration and wraps it in
//! [`ResilientGenerator`] so that every call has a deadline and transient
//! failures are retried with bounded backoff.

mod error;
mod fixture;
mod http;
mod openai;
mod retry;
mod role;

use std::sync::Arc;

use async_trait::async_trait;

use craft_config::{GeneratorBackend, GeneratorConfig};

pub use error::GeneratorError;
pub use fixture::FixtureGenerator;
pub use openai::OpenAiGenerator;
pub use retry::{ResilientGenerator, RetryConfig};
pub use role::Role;

/// Produces stage content for a role from a textual context.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate content for `role` from `context`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` if the backend is unreachable, refuses the
    /// request, times out, or returns nothing.
    async fn generate(&self, role: Role, context: &str) -> Result<String, GeneratorError>;

    /// Short backend name for logs.
    fn name(&self) -> &str;
}

/// Build the configured generator, wrapped with timeout and retry.
///
/// # Errors
///
/// Returns `GeneratorError::NotConfigured` if the `openai` backend is
/// selected without an API key.
pub fn build_generator(
    config: &GeneratorConfig,
) -> Result<Arc<dyn ContentGenerator>, GeneratorError> {
    let inner: Arc<dyn ContentGenerator> = match config.backend {
        GeneratorBackend::Fixture => Arc::new(FixtureGenerator::new()),
        GeneratorBackend::OpenAi => Arc::new(OpenAiGenerator::from_config(config)?),
    };
    tracing::debug!(backend = %config.backend, model = %config.model, "generator built");
    Ok(Arc::new(ResilientGenerator::new(
        inner,
        RetryConfig::from(config),
    )))
}
