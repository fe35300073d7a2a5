//! Cross-process structured errors.
//!
//! A [`StatusError`] carries four things: a transport-level status code, a
//! stable machine-readable `reason`, a human-readable `message`, and a
//! string metadata map. Identity is the reason alone: two errors are the
//! same kind iff their reasons are equal, no matter how the message or
//! metadata vary per occurrence.
//!
//! Values are immutable. [`StatusError::with_message`] and
//! [`StatusError::with_metadata`] return independent copies, so a
//! prototype registered in an [`ErrorRegistry`] can be customized per call
//! site without ever being corrupted.
//!
//! The wire path is [`StatusError::to_status`] on the way out and
//! [`from_error`] on the way in; the inbound path consults a registry so
//! that identity checks against locally registered prototypes still
//! succeed after a process hop.

use std::collections::BTreeMap;
use std::fmt;

use crate::grpc::{Code, ErrorInfo, Status};
use crate::http;

mod registry;
mod wire;

pub use registry::ErrorRegistry;
pub use wire::{from_error, resolve_error};

/// Reason carried by errors that could not be classified.
pub const UNKNOWN_REASON: &str = "";

/// A structured error with code, reason, message, and metadata.
///
/// Cheap to clone, safe to share across threads: every mutator produces a
/// new value and the receiver is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// Transport-level status code (gRPC code space). Not validated and
    /// not part of identity.
    code: i32,
    /// Identity key. Expected to be namespaced by the owning component.
    reason: String,
    /// Human-readable text, free to vary per occurrence.
    message: String,
    /// Structured context carried alongside the message.
    metadata: BTreeMap<String, String>,
}

impl StatusError {
    /// Constructs a fresh error value.
    ///
    /// The code range and reason format are conventions, not enforced:
    /// callers are expected to use the gRPC code space and non-empty,
    /// namespaced reasons.
    #[must_use]
    pub fn new(code: i32, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Returns the transport-level status code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Returns the machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the metadata mapping.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Returns a new error identical to `self` except for the message.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        let mut err = self.clone();
        err.message = message.into();
        err
    }

    /// Returns a new error identical to `self` with the metadata replaced
    /// wholesale (not merged).
    #[must_use]
    pub fn with_metadata(&self, metadata: BTreeMap<String, String>) -> Self {
        let mut err = self.clone();
        err.metadata = metadata;
        err
    }

    /// Reports whether `err` is the same kind of error as `self`.
    ///
    /// Walks the candidate's `source()` chain, so wrapping by intermediate
    /// layers does not hide the match. Only the reason participates;
    /// message, metadata, and code are ignored.
    #[must_use]
    pub fn is(&self, err: &(dyn std::error::Error + 'static)) -> bool {
        match from_chain(err) {
            Some(other) => self.reason == other.reason,
            None => false,
        }
    }

    /// Serializes this error into the transport status envelope.
    ///
    /// The code and message land on the envelope; reason and metadata
    /// travel verbatim in an error-info detail block.
    #[must_use]
    pub fn to_status(&self) -> Status {
        Status::new(Code::from_i32(self.code), &self.message).with_error_info(ErrorInfo {
            reason: self.reason.clone(),
            metadata: self.metadata.clone(),
        })
    }

    /// Returns the conventional HTTP status code for this error's code.
    #[must_use]
    pub fn to_http_status(&self) -> u16 {
        http::status::from_i32(self.code)
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: code = {} reason = {} message = {} metadata = {:?}",
            self.code, self.reason, self.message, self.metadata
        )
    }
}

impl std::error::Error for StatusError {}

impl From<StatusError> for Status {
    fn from(err: StatusError) -> Self {
        err.to_status()
    }
}

/// Returns the first [`StatusError`] in `err`'s `source()` chain, the
/// candidate itself included.
#[must_use]
pub fn from_chain<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a StatusError> {
    let mut cur: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(se) = e.downcast_ref::<StatusError>() {
            return Some(se);
        }
        cur = e.source();
    }
    None
}
