//! Uniform response envelope returned by every pipeline operation.
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": { "kind": "NOT_FOUND", "message": "...", "details": null } }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;

/// Failure payload of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// `{success, data}` on success, `{success=false, error}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub const fn err(error: ErrorBody) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Acknowledgement for operations without a natural payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ack {
    pub id: String,
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let json = serde_json::to_value(Envelope::ok(3_u32)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 3}));
    }

    #[test]
    fn error_envelope_omits_data() {
        let env: Envelope<u32> = Envelope::err(ErrorBody {
            kind: ErrorKind::NotFound,
            message: "Project not found".into(),
            details: None,
        });
        let json = serde_json::to_value(env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {"kind": "NOT_FOUND", "message": "Project not found"}
            })
        );
    }
}
