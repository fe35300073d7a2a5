//! Content-type codecs.
//!
//! A [`Codec`] converts between bytes and an untyped JSON value; the
//! generic [`marshal`]/[`unmarshal`] helpers bridge to concrete serde
//! types. Codecs are looked up by content type in a [`CodecRegistry`],
//! which ships with JSON and form codecs pre-registered.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod form;
pub mod json;

pub use form::FormCodec;
pub use json::JsonCodec;

/// A byte-level codec keyed by content type.
///
/// The object-safe core works on `serde_json::Value`; use [`marshal`] and
/// [`unmarshal`] for typed payloads.
pub trait Codec: Send + Sync + fmt::Debug {
    /// The content type this codec serves (no parameters).
    fn content_type(&self) -> &'static str;

    /// Encodes a value into bytes.
    fn marshal_value(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError>;

    /// Decodes bytes into a value.
    fn unmarshal_value(&self, data: &[u8]) -> Result<serde_json::Value, CodecError>;
}

/// Encodes a typed payload with `codec`.
pub fn marshal<T: Serialize>(codec: &dyn Codec, value: &T) -> Result<Vec<u8>, CodecError> {
    let value = serde_json::to_value(value).map_err(|e| CodecError::Serialize(e.to_string()))?;
    codec.marshal_value(&value)
}

/// Decodes a typed payload with `codec`.
pub fn unmarshal<T: DeserializeOwned>(codec: &dyn Codec, data: &[u8]) -> Result<T, CodecError> {
    let value = codec.unmarshal_value(data)?;
    serde_json::from_value(value).map_err(|e| CodecError::Deserialize(e.to_string()))
}

/// Codec errors.
#[derive(Debug)]
pub enum CodecError {
    /// Value could not be serialized.
    Serialize(String),
    /// Payload could not be deserialized.
    Deserialize(String),
    /// The value shape is not representable in the target format.
    UnsupportedValue(String),
    /// No codec registered for the content type.
    UnknownContentType(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "serialize error: {msg}"),
            Self::Deserialize(msg) => write!(f, "deserialize error: {msg}"),
            Self::UnsupportedValue(msg) => write!(f, "unsupported value: {msg}"),
            Self::UnknownContentType(ct) => write!(f, "no codec for content type: {ct}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Content-type keyed codec table.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: RwLock<HashMap<&'static str, Arc<dyn Codec>>>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the JSON and form codecs registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(JsonCodec));
        registry.register(Arc::new(FormCodec));
        registry
    }

    /// Registers a codec under its content type, replacing any previous
    /// codec for that type.
    pub fn register(&self, codec: Arc<dyn Codec>) {
        self.codecs.write().insert(codec.content_type(), codec);
    }

    /// Returns the codec for `content_type`.
    ///
    /// Parameters after `;` (e.g. `charset=utf-8`) are ignored.
    pub fn get(&self, content_type: &str) -> Result<Arc<dyn Codec>, CodecError> {
        let base = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        self.codecs
            .read()
            .get(base)
            .cloned()
            .ok_or_else(|| CodecError::UnknownContentType(content_type.to_string()))
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.codecs.read().keys().copied().collect();
        f.debug_struct("CodecRegistry").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
        node: String,
    }

    #[test]
    fn registry_defaults_and_params() {
        let registry = CodecRegistry::with_defaults();
        assert!(registry.get("application/json").is_ok());
        assert!(registry.get("application/json; charset=utf-8").is_ok());
        assert!(registry.get("application/x-www-form-urlencoded").is_ok());
        assert!(matches!(
            registry.get("application/xml"),
            Err(CodecError::UnknownContentType(_))
        ));
    }

    #[test]
    fn typed_round_trip_through_registry() {
        let registry = CodecRegistry::with_defaults();
        let codec = registry.get("application/json").expect("codec");
        let ping = Ping {
            seq: 3,
            node: "a".to_string(),
        };
        let bytes = marshal(codec.as_ref(), &ping).expect("marshal");
        let back: Ping = unmarshal(codec.as_ref(), &bytes).expect("unmarshal");
        assert_eq!(back, ping);
    }
}
