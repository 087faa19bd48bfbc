//! Stage transformer: builds generator context from parent artifacts and
//! turns generator output into records the store can persist.
//!
//! Structured stages (RTM, scenarios, test cases) must yield a non-empty
//! JSON array that satisfies the stage's output schema. Text stages must
//! yield non-blank text. Anything else is a contract violation and nothing
//! is written.

use serde::de::DeserializeOwned;

use craft_core::entities::{RawAsset, RtmItem, TestCase, TestScenario};
use craft_core::enums::Stage;
use craft_schema::SchemaRegistry;

use crate::error::PipelineError;

/// Context for the DOU stage: each asset as a `Type`/`Content` block,
/// separated by blank lines, in ingestion order.
///
/// # Errors
///
/// Returns `PipelineError::InvalidInput` when the project has no assets.
pub fn dou_context(assets: &[RawAsset]) -> Result<String, PipelineError> {
    if assets.is_empty() {
        return Err(PipelineError::InvalidInput(
            "No assets found to generate DOU".into(),
        ));
    }
    Ok(assets
        .iter()
        .map(|a| format!("Type: {}\nContent: {}", a.asset_type, a.content))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Context for the scenario stage: the RTM item's description. The
/// requirement ID is not part of it.
#[must_use]
pub fn scenario_context(item: &RtmItem) -> String {
    format!("Title: {}", item.description)
}

#[must_use]
pub fn test_case_context(scenario: &TestScenario) -> String {
    format!(
        "Title: {}\nDescription: {}\nSteps: {}",
        scenario.title,
        scenario.description.as_deref().unwrap_or_default(),
        scenario.steps
    )
}

#[must_use]
pub fn automated_test_context(case: &TestCase) -> String {
    format!(
        "Title: {}\nPreconditions: {}\nSteps: {}\nExpected: {}",
        case.title, case.preconditions, case.steps, case.expected_result
    )
}

/// Remove every markdown code fence marker and surrounding whitespace.
#[must_use]
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Remove a single fence wrapping the whole output, keeping inner text as is.
///
/// The opening fence line may carry a language tag (```` ```typescript ````).
#[must_use]
pub fn strip_outer_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim_end(),
        None => body.trim(),
    }
}

/// Parse structured generator output into stage records.
///
/// # Errors
///
/// Returns `PipelineError::Contract` if the output is not JSON, fails the
/// stage's output schema, or contains no records.
pub fn parse_records<T: DeserializeOwned>(
    stage: Stage,
    raw: &str,
    schemas: &SchemaRegistry,
) -> Result<Vec<T>, PipelineError> {
    let cleaned = strip_fences(raw);
    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| PipelineError::contract(stage, format!("output is not valid JSON: {e}")))?;

    schemas
        .validate_output(stage, &value)
        .map_err(|e| PipelineError::contract(stage, e.to_string()))?;

    let records: Vec<T> = serde_json::from_value(value)
        .map_err(|e| PipelineError::contract(stage, format!("unexpected record shape: {e}")))?;
    if records.is_empty() {
        return Err(PipelineError::contract(stage, "output contains no records"));
    }
    Ok(records)
}

/// Accept free-text generator output, rejecting blank text.
///
/// # Errors
///
/// Returns `PipelineError::Contract` if `text` is empty or whitespace.
pub fn require_text(stage: Stage, text: &str) -> Result<(), PipelineError> {
    if text.trim().is_empty() {
        return Err(PipelineError::contract(stage, "output is empty"));
    }
    Ok(())
}
