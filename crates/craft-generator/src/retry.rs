//! Timeout and bounded retry around any generator.
//!
//! Every call gets a deadline. Transient failures (timeouts, transport
//! errors, 429 and 5xx responses) are retried with capped exponential
//! backoff; anything else is returned on the spot.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use craft_config::GeneratorConfig;

use crate::ContentGenerator;
use crate::error::GeneratorError;
use crate::role::Role;

/// Configuration for retry behavior on transient generator errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
    /// Deadline for a single attempt.
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for RetryConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay(),
            max_delay: config.max_delay(),
            timeout: config.timeout(),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (1-based), doubling each time.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Delay after `err`: the backoff, stretched to honour `Retry-After`
    /// without exceeding `max_delay`.
    fn delay_after(&self, err: &GeneratorError, retry: u32) -> Duration {
        let backoff = self.backoff(retry);
        match err {
            GeneratorError::RateLimited { retry_after_secs } => backoff
                .max(Duration::from_secs(*retry_after_secs))
                .min(self.max_delay),
            _ => backoff,
        }
    }
}

pub struct ResilientGenerator {
    inner: Arc<dyn ContentGenerator>,
    retry: RetryConfig,
}

impl ResilientGenerator {
    #[must_use]
    pub fn new(inner: Arc<dyn ContentGenerator>, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }

    async fn attempt(&self, role: Role, context: &str) -> Result<String, GeneratorError> {
        tokio::time::timeout(self.retry.timeout, self.inner.generate(role, context))
            .await
            .map_err(|_| GeneratorError::Timeout(self.retry.timeout))?
    }
}

#[async_trait]
impl ContentGenerator for ResilientGenerator {
    async fn generate(&self, role: Role, context: &str) -> Result<String, GeneratorError> {
        let mut attempt = 1;
        loop {
            match self.attempt(role, context).await {
                Ok(output) => return Ok(output),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_after(&err, attempt);
                    tracing::warn!(
                        generator = self.inner.name(),
                        %role,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient generator failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(
                        generator = self.inner.name(),
                        %role,
                        attempt,
                        error = %err,
                        "generator call failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
