//! URL-encoded form codec.
//!
//! Encodes flat objects as `application/x-www-form-urlencoded` pairs.
//! Scalars become strings, arrays of scalars become repeated keys, and
//! empty or null values are dropped on encode. Nested objects are not
//! representable and return an error. Decoded values are always strings;
//! repeated keys decode to an array of strings.

use super::{Codec, CodecError};

/// Codec for `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCodec;

impl Codec for FormCodec {
    fn content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn marshal_value(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError> {
        let serde_json::Value::Object(map) = value else {
            return Err(CodecError::UnsupportedValue(
                "form encoding requires an object".to_string(),
            ));
        };
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (key, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Array(items) => {
                    for item in items {
                        if let Some(s) = scalar_to_string(item)? {
                            pairs.push((key.clone(), s));
                        }
                    }
                }
                other => {
                    if let Some(s) = scalar_to_string(other)? {
                        pairs.push((key.clone(), s));
                    }
                }
            }
        }
        Ok(encode_pairs(&pairs).into_bytes())
    }

    fn unmarshal_value(&self, data: &[u8]) -> Result<serde_json::Value, CodecError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| CodecError::Deserialize(format!("invalid utf-8: {e}")))?;
        let pairs = parse_pairs(text)?;
        let mut map = serde_json::Map::new();
        for (key, value) in pairs {
            match map.entry(key) {
                serde_json::map::Entry::Vacant(slot) => {
                    slot.insert(serde_json::Value::String(value));
                }
                serde_json::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                    serde_json::Value::Array(items) => {
                        items.push(serde_json::Value::String(value));
                    }
                    existing => {
                        let first = existing.take();
                        *existing = serde_json::Value::Array(vec![
                            first,
                            serde_json::Value::String(value),
                        ]);
                    }
                },
            }
        }
        Ok(serde_json::Value::Object(map))
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Result<Option<String>, CodecError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => {
            if s.is_empty() {
                Ok(None)
            } else {
                Ok(Some(s.clone()))
            }
        }
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
            CodecError::UnsupportedValue("nested values cannot be form-encoded".to_string()),
        ),
    }
}

/// Encodes pairs into a query string. Pair order is preserved.
#[must_use]
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        escape_into(&mut out, key);
        out.push('=');
        escape_into(&mut out, value);
    }
    out
}

/// Parses a query string into pairs, decoding `+` and `%XX` escapes.
pub fn parse_pairs(text: &str) -> Result<Vec<(String, String)>, CodecError> {
    let mut pairs = Vec::new();
    for piece in text.split('&') {
        if piece.is_empty() {
            continue;
        }
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        pairs.push((unescape(key)?, unescape(value)?));
    }
    Ok(pairs)
}

fn escape_into(out: &mut String, s: &str) {
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from_digit(u32::from(byte >> 4), 16).unwrap_or('0').to_ascii_uppercase());
                out.push(char::from_digit(u32::from(byte & 0xf), 16).unwrap_or('0').to_ascii_uppercase());
            }
        }
    }
}

fn unescape(s: &str) -> Result<String, CodecError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = s.get(i + 1..i + 3).ok_or_else(|| {
                    CodecError::Deserialize(format!("truncated percent escape in {s:?}"))
                })?;
                let byte = u8::from_str_radix(hex, 16)
                    .map_err(|_| CodecError::Deserialize(format!("bad escape %{hex} in {s:?}")))?;
                out.push(byte);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|e| CodecError::Deserialize(format!("invalid utf-8: {e}")))
}
