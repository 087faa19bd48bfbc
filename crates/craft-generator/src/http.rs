//! Shared HTTP response helpers for the network generator.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success to [`GeneratorError::Api`]).

use crate::error::GeneratorError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GeneratorError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(GeneratorError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(GeneratorError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 1 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}
