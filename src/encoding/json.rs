//! JSON codec.

use super::{Codec, CodecError};

/// Codec for `application/json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn marshal_value(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Serialize(e.to_string()))
    }

    fn unmarshal_value(&self, data: &[u8]) -> Result<serde_json::Value, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::Deserialize(e.to_string()))
    }
}
