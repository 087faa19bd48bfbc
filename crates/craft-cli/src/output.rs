use std::process::ExitCode;

use serde::Serialize;

use craft_core::responses::Envelope;
use craft_pipeline::{PipelineError, respond};

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print an operation result as an envelope. Failures exit non-zero.
pub fn emit<T: Serialize>(
    result: Result<T, PipelineError>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    if let Err(error) = &result {
        tracing::error!(kind = %error.kind(), status = error.http_status(), %error, "operation failed");
    }
    let envelope: Envelope<T> = respond(result);
    output(&envelope, format)?;
    Ok(if envelope.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::enums::EntityKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn raw_is_single_line() {
        let rendered = render(&respond::<u8>(Ok(7)), OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"success":true,"data":7}"#);
    }

    #[test]
    fn failure_envelope_carries_kind() {
        let result: Result<u8, _> = Err(PipelineError::NotFound {
            entity: EntityKind::Project,
            id: "prj-1".into(),
        });
        let rendered = render(&respond(result), OutputFormat::Raw).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["kind"], "NOT_FOUND");
        assert!(value.get("data").is_none());
    }
}
