//! Structured Error Model Verification Suite
//!
//! Verifies the public contract of the error model end to end:
//!   - Value semantics and immutability (001-004)
//!   - Identity and wrapped-error inspection (005-007)
//!   - Registry behavior (008-009)
//!   - Wire round trips through the status envelope (010-014)
//!   - Degradation for unclassifiable errors (015-017)
//!   - HTTP status translation (018-019)

use std::collections::BTreeMap;
use std::fmt;

use proptest::prelude::*;

use svckit::errors::{from_error, resolve_error, ErrorRegistry, StatusError, UNKNOWN_REASON};
use svckit::grpc::{Code, ErrorInfo, Status};

fn md(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Sends a status through the byte-level detail payload, as a transport
/// would: envelope fields are copied, details travel encoded.
fn wire_round_trip(status: &Status) -> Status {
    let payload = status.encode_details().expect("encode details");
    Status::new(status.code(), status.message())
        .decode_details(&payload)
        .expect("decode details")
}

#[derive(Debug)]
struct Wrapping<E> {
    inner: E,
}

impl<E: fmt::Debug> fmt::Display for Wrapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wrapped: {:?}", self.inner)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for Wrapping<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

// ---- Value semantics (001-004) ----

#[test]
fn v001_with_message_does_not_mutate_receiver() {
    let base = StatusError::new(5, "store.not_found", "default not found");
    let _ = base.with_message("occurrence");
    assert_eq!(base.message(), "default not found");
    assert_eq!(base.reason(), "store.not_found");
    assert!(base.metadata().is_empty());
}

#[test]
fn v002_with_metadata_does_not_mutate_receiver() {
    let base = StatusError::new(5, "store.not_found", "default").with_metadata(md(&[("a", "1")]));
    let _ = base.with_metadata(md(&[("b", "2")]));
    assert_eq!(base.metadata(), &md(&[("a", "1")]));
}

#[test]
fn v003_metadata_copies_are_independent() {
    let base = StatusError::new(5, "store.not_found", "default");
    let a = base.with_metadata(md(&[("k", "v")]));
    let b = base.with_metadata(md(&[("k", "v2")]));
    assert_eq!(a.metadata().get("k").map(String::as_str), Some("v"));
    assert_eq!(b.metadata().get("k").map(String::as_str), Some("v2"));
}

#[test]
fn v004_registered_prototype_survives_caller_customization() {
    let registry = ErrorRegistry::new();
    registry.register(StatusError::new(5, "store.not_found", "default"));

    let proto = registry.lookup("store.not_found").expect("registered");
    let _ = proto
        .with_message("user 42 not found")
        .with_metadata(md(&[("id", "42")]));

    let again = registry.lookup("store.not_found").expect("registered");
    assert_eq!(again.message(), "default");
    assert!(again.metadata().is_empty());
}

// ---- Identity (005-007) ----

#[test]
fn v005_identity_ignores_message_and_metadata() {
    let proto = StatusError::new(5, "store.not_found", "default");
    let occurrence = proto
        .with_message("other text")
        .with_metadata(md(&[("id", "42")]));
    assert!(proto.is(&occurrence));
}

#[test]
fn v006_identity_differs_across_reasons() {
    let a = StatusError::new(5, "store.not_found", "x");
    let b = StatusError::new(5, "store.conflict", "x");
    assert!(!a.is(&b));
}

#[test]
fn v007_identity_sees_through_wrapping_layers() {
    let proto = StatusError::new(7, "auth.denied", "denied");
    let wrapped = Wrapping {
        inner: Wrapping {
            inner: proto.with_message("token expired"),
        },
    };
    assert!(proto.is(&wrapped));
}

// ---- Registry (008-009) ----

#[test]
fn v008_lookup_misses_are_none() {
    let registry = ErrorRegistry::new();
    assert!(registry.lookup("never.registered").is_none());
}

#[test]
fn v009_last_registration_wins() {
    let registry = ErrorRegistry::new();
    registry.register(StatusError::new(5, "shared.reason", "first"));
    registry.register(StatusError::new(13, "shared.reason", "second"));
    let proto = registry.lookup("shared.reason").expect("registered");
    assert_eq!(proto.code(), 13);
    assert_eq!(proto.message(), "second");
}

// ---- Wire round trips (010-014) ----

#[test]
fn v010_identity_survives_round_trip() {
    let registry = ErrorRegistry::new();
    let proto = StatusError::new(5, "not_found", "default not found");
    registry.register(proto.clone());

    let status = wire_round_trip(&proto.with_message("user 42 not found").to_status());
    let received = resolve_error(&status, &registry);

    assert!(proto.is(&received));
    assert_eq!(received.reason(), "not_found");
    assert_eq!(received.message(), "user 42 not found");
}

#[test]
fn v011_metadata_round_trips_byte_for_byte() {
    let registry = ErrorRegistry::new();
    let proto = StatusError::new(3, "core.invalid", "invalid");
    registry.register(proto.clone());

    let metadata = md(&[("field", "email"), ("value", "a+b@%7B.example"), ("", "")]);
    let status = wire_round_trip(&proto.with_metadata(metadata.clone()).to_status());
    let received = resolve_error(&status, &registry);

    assert_eq!(received.metadata(), &metadata);
}

#[test]
fn v012_typed_error_short_circuits_without_serialization() {
    let registry = ErrorRegistry::new();
    let err = StatusError::new(9, "job.precondition", "not ready");
    let wrapped = Wrapping { inner: err.clone() };
    let resolved = resolve_error(&wrapped, &registry);
    assert_eq!(resolved, err);
}

#[test]
fn v013_unknown_reason_passes_through() {
    let registry = ErrorRegistry::new();
    registry.register(StatusError::new(5, "store.not_found", "default"));

    let status = wire_round_trip(
        &Status::new(Code::from_i32(5), "nope").with_error_info(
            ErrorInfo::new("nonexistent_reason_xyz").with_metadata(md(&[("a", "b")])),
        ),
    );
    let received = resolve_error(&status, &registry);

    assert_eq!(received.reason(), "nonexistent_reason_xyz");
    assert_eq!(received.code(), 5);
    assert_eq!(received.message(), "nope");
    assert_eq!(received.metadata(), &md(&[("a", "b")]));

    let proto = registry.lookup("store.not_found").expect("registered");
    assert!(!proto.is(&received));
}

#[test]
fn v014_registered_code_wins_over_transported_code() {
    // The registered prototype carries the canonical code; the envelope
    // code is only used when the reason is unregistered.
    let registry = ErrorRegistry::new();
    registry.register(StatusError::new(5, "store.not_found", "default"));

    let status = Status::new(Code::Internal, "relabeled upstream")
        .with_error_info(ErrorInfo::new("store.not_found"));
    let received = resolve_error(&status, &registry);
    assert_eq!(received.code(), 5);
}

// ---- Degradation (015-017) ----

#[test]
fn v015_absent_error_resolves_to_none() {
    let registry = ErrorRegistry::new();
    assert!(from_error(None, &registry).is_none());
}

#[test]
fn v016_opaque_error_degrades_to_unknown_sentinel() {
    let registry = ErrorRegistry::new();
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let received = resolve_error(&io, &registry);

    assert_eq!(received.code(), Code::Unknown.as_i32());
    assert_eq!(received.reason(), UNKNOWN_REASON);
    assert_eq!(received.message(), io.to_string());
}

#[test]
fn v017_bare_status_preserves_transported_code() {
    let registry = ErrorRegistry::new();
    let status = Status::new(Code::ResourceExhausted, "quota exceeded");
    let received = resolve_error(&status, &registry);

    assert_eq!(received.code(), Code::ResourceExhausted.as_i32());
    assert_eq!(received.reason(), UNKNOWN_REASON);
    assert_eq!(received.message(), "quota exceeded");
}

// ---- HTTP translation (018-019) ----

#[test]
fn v018_http_mapping_is_total_over_raw_codes() {
    for code in -3..40 {
        let http = svckit::http::status::from_i32(code);
        assert!((100..=599).contains(&http), "code {code} -> {http}");
    }
}

#[test]
fn v019_error_delegates_to_translator() {
    assert_eq!(StatusError::new(5, "store.not_found", "x").to_http_status(), 404);
    assert_eq!(StatusError::new(7, "auth.denied", "x").to_http_status(), 403);
    assert_eq!(StatusError::new(999, "odd.code", "x").to_http_status(), 500);
}

// ---- Properties ----

proptest! {
    /// Any error serialized with an error-info detail comes back with its
    /// reason, message, and metadata intact, registered or not.
    #[test]
    fn prop_wire_round_trip_preserves_fields(
        code in 0i32..17,
        reason in "[a-z][a-z_.]{0,24}",
        message in ".{0,40}",
        metadata in proptest::collection::btree_map("[a-z_]{1,8}", ".{0,16}", 0..4),
        register in proptest::bool::ANY,
    ) {
        let registry = ErrorRegistry::new();
        let err = StatusError::new(code, reason.clone(), message.clone())
            .with_metadata(metadata.clone());
        if register {
            registry.register(StatusError::new(code, reason.clone(), "prototype"));
        }

        let status = wire_round_trip(&err.to_status());
        let received = resolve_error(&status, &registry);

        prop_assert_eq!(received.reason(), reason.as_str());
        prop_assert_eq!(received.message(), message.as_str());
        prop_assert_eq!(received.metadata(), &metadata);
        prop_assert!(err.is(&received));
    }
}
