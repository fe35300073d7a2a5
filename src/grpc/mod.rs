//! gRPC transport surface.
//!
//! Only the pieces of the transport the error model depends on live here:
//! the status code space and the status envelope with its typed detail
//! blocks. Server and channel plumbing belong to the RPC framework that
//! hosts this toolkit.

pub mod status;

pub use status::{Code, Detail, ErrorInfo, Status, ERROR_INFO_TYPE_URL};
