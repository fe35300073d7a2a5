//! Mapping from the gRPC code space to HTTP status codes.

use crate::grpc::Code;

/// Default HTTP status for unknown or unmapped codes.
pub const DEFAULT_HTTP_STATUS: u16 = 500;

/// Returns the conventional HTTP status code for `code`.
///
/// Total over the code space; the mapping follows the canonical
/// grpc-gateway table.
#[must_use]
pub const fn from_code(code: Code) -> u16 {
    match code {
        Code::Ok => 200,
        Code::Cancelled => 499,
        Code::Unknown => DEFAULT_HTTP_STATUS,
        Code::InvalidArgument => 400,
        Code::DeadlineExceeded => 504,
        Code::NotFound => 404,
        Code::AlreadyExists => 409,
        Code::PermissionDenied => 403,
        Code::ResourceExhausted => 429,
        Code::FailedPrecondition => 400,
        Code::Aborted => 409,
        Code::OutOfRange => 400,
        Code::Unimplemented => 501,
        Code::Internal => 500,
        Code::Unavailable => 503,
        Code::DataLoss => 500,
        Code::Unauthenticated => 401,
    }
}

/// Returns the HTTP status for a raw code value.
///
/// Values outside the gRPC code space fall back to
/// [`DEFAULT_HTTP_STATUS`] via the total `Code::from_i32`.
#[must_use]
pub fn from_i32(code: i32) -> u16 {
    from_code(Code::from_i32(code))
}
