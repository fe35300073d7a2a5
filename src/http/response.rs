//! Response envelope for the companion text transport.
//!
//! The HTTP transport owns the body format; this envelope is the shape
//! services agree on: a string code, a message, and an optional data
//! payload. For errors, the code slot carries the error's reason so
//! clients can react programmatically without parsing the message.

use serde::{Deserialize, Serialize};

use crate::errors::StatusError;
use crate::grpc::Code;

/// Code string reported on successful responses.
pub const SUCCESS_CODE: &str = "SUCCESS";

/// The standard response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Machine-readable code: [`SUCCESS_CODE`] or an error reason.
    pub code: String,
    /// Human-readable message.
    pub msg: String,
    /// Optional payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Response {
    /// Builds a success envelope around `data`.
    #[must_use]
    pub fn success(data: Option<serde_json::Value>) -> Self {
        Self {
            code: SUCCESS_CODE.to_string(),
            msg: String::new(),
            data,
        }
    }

    /// Builds an error envelope from a structured error.
    ///
    /// Errors with an empty (unknown) reason report the canonical name of
    /// their status code instead, so the code slot is never empty.
    #[must_use]
    pub fn from_error(err: &StatusError) -> Self {
        let code = if err.reason().is_empty() {
            Code::from_i32(err.code()).as_str().to_string()
        } else {
            err.reason().to_string()
        };
        let mut data = None;
        if !err.metadata().is_empty() {
            if let Ok(value) = serde_json::to_value(err.metadata()) {
                data = Some(value);
            }
        }
        Self {
            code,
            msg: err.message().to_string(),
            data,
        }
    }

    /// Returns true if this envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn success_envelope() {
        let resp = Response::success(Some(serde_json::json!({"id": 1})));
        assert!(resp.is_success());
        assert_eq!(resp.code, SUCCESS_CODE);
    }

    #[test]
    fn error_envelope_carries_reason_and_metadata() {
        let mut metadata = BTreeMap::new();
        metadata.insert("id".to_string(), "42".to_string());
        let err = StatusError::new(5, "store.not_found", "user 42 not found")
            .with_metadata(metadata);

        let resp = Response::from_error(&err);
        assert!(!resp.is_success());
        assert_eq!(resp.code, "store.not_found");
        assert_eq!(resp.msg, "user 42 not found");
        assert_eq!(resp.data, Some(serde_json::json!({"id": "42"})));
    }

    #[test]
    fn unknown_reason_reports_code_name() {
        let err = StatusError::new(2, "", "something odd");
        let resp = Response::from_error(&err);
        assert_eq!(resp.code, "UNKNOWN");
        assert_eq!(resp.data, None);
    }

    #[test]
    fn envelope_serialization_round_trip() {
        let resp = Response::success(None);
        let bytes = serde_json::to_vec(&resp).expect("serialize");
        let back: Response = serde_json::from_slice(&bytes).expect("deserialize");
        assert_eq!(back, resp);
        // `data` is omitted entirely when absent.
        assert!(!String::from_utf8(bytes).expect("utf8").contains("data"));
    }
}
