//! svckit: a microservice utility toolkit.
//!
//! The heart of the crate is its cross-process structured error model:
//!
//! - [`errors::StatusError`] — an immutable error value carrying a status
//!   code, a machine-readable reason (the identity key), a human message,
//!   and string metadata.
//! - [`errors::ErrorRegistry`] — the process-wide table of registered
//!   error prototypes, consulted when errors come back over the wire.
//! - [`grpc::Status`] — the status envelope errors serialize onto, with
//!   typed detail blocks.
//! - [`http::status`] — the total mapping onto HTTP status codes for the
//!   text transport.
//!
//! Around it sit the usual service utilities: structured logging
//! ([`log`]), layered configuration ([`config`]), content-type codecs
//! ([`encoding`]), pagination ([`pagination`]), trusted auth-header
//! parsing ([`auth`]), and the app/server lifecycle seam ([`app`],
//! [`transport`]).
//!
//! # Example
//!
//! ```
//! use svckit::errors::{from_error, ErrorRegistry, StatusError};
//!
//! // During startup, a component registers its vocabulary.
//! let registry = ErrorRegistry::new();
//! let not_found = StatusError::new(5, "store.not_found", "not found");
//! registry.register(not_found.clone());
//!
//! // At a call site, an occurrence is customized without touching the
//! // prototype, and serialized onto the transport status.
//! let status = not_found.with_message("user 42 not found").to_status();
//!
//! // On the receiving side, identity against the registered prototype
//! // survives the round trip.
//! let incoming: &(dyn std::error::Error + 'static) = &status;
//! let received = from_error(Some(incoming), &registry).unwrap();
//! assert!(not_found.is(&received));
//! assert_eq!(received.message(), "user 42 not found");
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod grpc;
pub mod http;
pub mod log;
pub mod pagination;
pub mod transport;

pub use errors::{from_error, resolve_error, ErrorRegistry, StatusError, UNKNOWN_REASON};
pub use grpc::{Code, Status};
