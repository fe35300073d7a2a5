//! HTTP-side bridges.
//!
//! The toolkit is status-code-native on the RPC side; this module holds
//! the two things the text transport needs: the translation from the gRPC
//! code space to HTTP status codes, and the response envelope services
//! put error bodies in.

pub mod response;
pub mod status;

pub use response::{Response, SUCCESS_CODE};
