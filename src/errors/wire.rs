//! Inbound half of the wire codec.
//!
//! Classifies an arbitrary error value coming back from an RPC call and
//! reconstructs the richest [`StatusError`] the local process can
//! produce. This path never fails: an error that cannot be classified is
//! degraded to the unknown-reason sentinel, never dropped or panicked on.

use super::registry::ErrorRegistry;
use super::{from_chain, StatusError, UNKNOWN_REASON};
use crate::grpc::{Code, ErrorInfo, Status};

/// Classification of an inbound error value.
///
/// Exactly one variant applies to any error; `resolve_error` matches them
/// exhaustively so the fallback ordering is fixed by construction.
enum InboundError<'a> {
    /// The unwrap chain already carries a [`StatusError`]; same-process
    /// propagation needs no wire round-trip.
    Typed(&'a StatusError),
    /// Status-shaped with an error-info detail block.
    Info(&'a Status, &'a ErrorInfo),
    /// Status-shaped, but from a peer unaware of the error model.
    Bare(&'a Status),
    /// Not status-shaped at all.
    Opaque(&'a (dyn std::error::Error + 'static)),
}

fn classify<'a>(err: &'a (dyn std::error::Error + 'static)) -> InboundError<'a> {
    if let Some(se) = from_chain(err) {
        return InboundError::Typed(se);
    }
    let mut cur: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(status) = e.downcast_ref::<Status>() {
            return match status.error_info() {
                Some(info) => InboundError::Info(status, info),
                None => InboundError::Bare(status),
            };
        }
        cur = e.source();
    }
    InboundError::Opaque(err)
}

/// Reconstructs a [`StatusError`] from any inbound error value.
///
/// Resolution order:
/// 1. a `StatusError` anywhere in the unwrap chain is returned as-is;
/// 2. a status with an error-info detail is resolved against `registry` —
///    a registered reason yields the registered prototype carrying the
///    received message and metadata, an unregistered one yields a
///    synthesized error with the received reason preserved;
/// 3. a bare status keeps its code and message under [`UNKNOWN_REASON`];
/// 4. anything else degrades to `Code::Unknown` with the error's rendered
///    text as the message.
#[must_use]
pub fn resolve_error(
    err: &(dyn std::error::Error + 'static),
    registry: &ErrorRegistry,
) -> StatusError {
    match classify(err) {
        InboundError::Typed(se) => se.clone(),
        InboundError::Info(status, info) => match registry.lookup(&info.reason) {
            Some(proto) => proto
                .with_message(status.message())
                .with_metadata(info.metadata.clone()),
            None => StatusError::new(status.code().as_i32(), &info.reason, status.message())
                .with_metadata(info.metadata.clone()),
        },
        InboundError::Bare(status) => {
            StatusError::new(status.code().as_i32(), UNKNOWN_REASON, status.message())
        }
        InboundError::Opaque(e) => {
            StatusError::new(Code::Unknown.as_i32(), UNKNOWN_REASON, e.to_string())
        }
    }
}

/// Like [`resolve_error`], but maps the absence of an error to `None`.
#[must_use]
pub fn from_error(
    err: Option<&(dyn std::error::Error + 'static)>,
    registry: &ErrorRegistry,
) -> Option<StatusError> {
    err.map(|e| resolve_error(e, registry))
}
