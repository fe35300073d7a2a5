//! gRPC status codes and the status envelope.
//!
//! Implements the status representation errors travel in: a numeric code
//! from the gRPC code space, a human-readable message, and a list of typed
//! detail blocks. The [`ErrorInfo`] detail mirrors the standard
//! `google.rpc.ErrorInfo` extension and is what carries an error's reason
//! and metadata across a process boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Type URL tag for the error-info detail block.
pub const ERROR_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";

/// gRPC status codes.
///
/// These codes follow the gRPC specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Code {
    /// Not an error; returned on success.
    Ok = 0,
    /// The operation was cancelled, typically by the caller.
    Cancelled = 1,
    /// Unknown error.
    Unknown = 2,
    /// The client specified an invalid argument.
    InvalidArgument = 3,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded = 4,
    /// Some requested entity was not found.
    NotFound = 5,
    /// The entity that a client attempted to create already exists.
    AlreadyExists = 6,
    /// The caller does not have permission to execute the operation.
    PermissionDenied = 7,
    /// Some resource has been exhausted.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation's execution.
    FailedPrecondition = 9,
    /// The operation was aborted.
    Aborted = 10,
    /// The operation was attempted past the valid range.
    OutOfRange = 11,
    /// The operation is not implemented or not supported.
    Unimplemented = 12,
    /// Internal error.
    Internal = 13,
    /// The service is currently unavailable.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// The request does not have valid authentication credentials.
    Unauthenticated = 16,
}

impl Code {
    /// Convert from an i32 value.
    ///
    /// Total: values outside the enumeration map to [`Code::Unknown`].
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => Self::Unknown,
        }
    }

    /// Convert to i32 value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns the canonical name for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Code {
    fn default() -> Self {
        Self::Unknown
    }
}

/// The typed error-info detail block.
///
/// Carries a machine-readable reason and string metadata alongside the
/// status envelope. Values round-trip byte-for-byte through
/// [`Status::encode_details`] / [`Status::decode_details`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine-readable identifier for the error kind.
    pub reason: String,
    /// Structured context (field names, offending values, trace ids).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ErrorInfo {
    /// Creates an error-info block with empty metadata.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Replaces the metadata mapping.
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A typed status detail block.
///
/// Details from peers that speak this error model decode to
/// [`Detail::ErrorInfo`]; anything else is preserved losslessly as
/// [`Detail::Opaque`] so unrecognized blocks survive a relay hop.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    /// The error-info extension (reason + metadata).
    ErrorInfo(ErrorInfo),
    /// A detail block of an unrecognized type, kept verbatim.
    Opaque {
        /// The type URL tag of the block.
        type_url: String,
        /// The block payload, as received.
        data: serde_json::Value,
    },
}

/// Wire form of a detail block: a type URL plus an untyped payload.
#[derive(Serialize, Deserialize)]
struct WireDetail {
    type_url: String,
    value: serde_json::Value,
}

/// gRPC status with code, message, and typed details.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    /// The status code.
    code: Code,
    /// A human-readable description of the error.
    message: String,
    /// Typed detail blocks.
    details: Vec<Detail>,
}

impl Status {
    /// Create a new status with the given code and message.
    #[must_use]
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Create an OK status.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(Code::Ok, "")
    }

    /// Create an unknown error status.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Code::Unknown, message)
    }

    /// Create an invalid argument status.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    /// Create a not found status.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    /// Create a permission denied status.
    #[must_use]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(Code::PermissionDenied, message)
    }

    /// Create an internal error status.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }

    /// Create an unavailable status.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }

    /// Create an unauthenticated status.
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(Code::Unauthenticated, message)
    }

    /// Appends a detail block.
    #[must_use]
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.details.push(detail);
        self
    }

    /// Appends an error-info detail block.
    #[must_use]
    pub fn with_error_info(self, info: ErrorInfo) -> Self {
        self.with_detail(Detail::ErrorInfo(info))
    }

    /// Get the status code.
    #[must_use]
    pub fn code(&self) -> Code {
        self.code
    }

    /// Get the status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the status details.
    #[must_use]
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// Returns the first error-info detail block, if any.
    #[must_use]
    pub fn error_info(&self) -> Option<&ErrorInfo> {
        self.details.iter().find_map(|d| match d {
            Detail::ErrorInfo(info) => Some(info),
            Detail::Opaque { .. } => None,
        })
    }

    /// Returns true if this is an OK status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    /// Serializes the detail blocks into the wire payload.
    ///
    /// The payload is what a transport places in its status-details
    /// trailer. Both typed and opaque blocks are preserved.
    pub fn encode_details(&self) -> Result<Vec<u8>, serde_json::Error> {
        let wire: Vec<WireDetail> = self
            .details
            .iter()
            .map(|d| match d {
                Detail::ErrorInfo(info) => Ok(WireDetail {
                    type_url: ERROR_INFO_TYPE_URL.to_string(),
                    value: serde_json::to_value(info)?,
                }),
                Detail::Opaque { type_url, data } => Ok(WireDetail {
                    type_url: type_url.clone(),
                    value: data.clone(),
                }),
            })
            .collect::<Result<_, serde_json::Error>>()?;
        serde_json::to_vec(&wire)
    }

    /// Parses a wire detail payload and attaches the blocks to `self`.
    ///
    /// Blocks tagged with [`ERROR_INFO_TYPE_URL`] whose payload does not
    /// parse as an [`ErrorInfo`] are kept as opaque rather than dropped.
    pub fn decode_details(mut self, payload: &[u8]) -> Result<Self, serde_json::Error> {
        let wire: Vec<WireDetail> = serde_json::from_slice(payload)?;
        for WireDetail { type_url, value } in wire {
            let detail = if type_url == ERROR_INFO_TYPE_URL {
                match serde_json::from_value::<ErrorInfo>(value.clone()) {
                    Ok(info) => Detail::ErrorInfo(info),
                    Err(_) => Detail::Opaque {
                        type_url,
                        data: value,
                    },
                }
            } else {
                Detail::Opaque {
                    type_url,
                    data: value,
                }
            };
            self.details.push(detail);
        }
        Ok(self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn code_from_i32_total() {
        assert_eq!(Code::from_i32(0), Code::Ok);
        assert_eq!(Code::from_i32(5), Code::NotFound);
        assert_eq!(Code::from_i32(16), Code::Unauthenticated);
        assert_eq!(Code::from_i32(99), Code::Unknown);
        assert_eq!(Code::from_i32(-1), Code::Unknown);
    }

    #[test]
    fn code_as_str() {
        assert_eq!(Code::Ok.as_str(), "OK");
        assert_eq!(Code::PermissionDenied.as_str(), "PERMISSION_DENIED");
        assert_eq!(Code::NotFound.to_string(), "NOT_FOUND");
    }

    #[test]
    fn status_creation() {
        let status = Status::not_found("resource not found");
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "resource not found");
        assert!(status.details().is_empty());
        assert!(!status.is_ok());
    }

    #[test]
    fn status_ok() {
        let status = Status::ok();
        assert!(status.is_ok());
        assert_eq!(status.code(), Code::Ok);
    }

    #[test]
    fn error_info_lookup_skips_opaque() {
        let status = Status::internal("boom")
            .with_detail(Detail::Opaque {
                type_url: "example.com/Debug".to_string(),
                data: serde_json::json!({"stack": "..."}),
            })
            .with_error_info(ErrorInfo::new("io.not_found"));
        let info = status.error_info().expect("error info");
        assert_eq!(info.reason, "io.not_found");
    }

    #[test]
    fn details_round_trip() {
        let status = Status::not_found("missing")
            .with_error_info(
                ErrorInfo::new("store.not_found").with_metadata(md(&[("key", "user/42")])),
            )
            .with_detail(Detail::Opaque {
                type_url: "example.com/RetryInfo".to_string(),
                data: serde_json::json!({"retry_delay_ms": 250}),
            });

        let payload = status.encode_details().expect("encode");
        let decoded = Status::not_found("missing")
            .decode_details(&payload)
            .expect("decode");

        assert_eq!(decoded.details(), status.details());
        let info = decoded.error_info().expect("error info");
        assert_eq!(info.metadata.get("key").map(String::as_str), Some("user/42"));
    }

    #[test]
    fn malformed_error_info_kept_opaque() {
        let payload = serde_json::to_vec(&serde_json::json!([
            {"type_url": ERROR_INFO_TYPE_URL, "value": {"reason": 7}}
        ]))
        .expect("payload");
        let decoded = Status::internal("x")
            .decode_details(&payload)
            .expect("decode");
        assert!(decoded.error_info().is_none());
        assert!(matches!(decoded.details()[0], Detail::Opaque { .. }));
    }

    #[test]
    fn status_is_std_error() {
        let status = Status::unavailable("backend down");
        let err: &dyn std::error::Error = &status;
        assert_eq!(err.to_string(), "status UNAVAILABLE: backend down");
    }
}
