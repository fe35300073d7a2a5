//! Authentication context parsing.
//!
//! The API gateway authenticates requests and forwards the verified
//! identity in a trusted header: a base64-encoded query string carrying
//! `user`, `role`, and `tenant`. This module parses that header into a
//! [`User`]; performing the upstream authentication call is the HTTP
//! client's job, not this module's.

use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::encoding::form;

/// Header carrying the caller's bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Trusted header carrying the gateway-verified identity.
pub const AUTH_USER_HEADER: &str = "X-Svc-Auth";

/// A gateway-verified caller identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// User identifier.
    pub id: String,
    /// Role name.
    pub role: String,
    /// Tenant the user belongs to.
    pub tenant: String,
    /// Bearer token, when forwarded.
    pub token: String,
}

/// An authorization record returned by the authentication service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    /// Authenticated user identifier.
    pub id: String,
    /// Tenant identifier.
    pub tenant_id: String,
    /// The token that was validated.
    pub token: String,
}

/// Auth parsing errors.
#[derive(Debug)]
pub enum AuthError {
    /// The trusted identity header is absent.
    MissingHeader,
    /// The header is not valid base64.
    Decode(String),
    /// The decoded header is not a query string.
    Parse(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "authorization info not found"),
            Self::Decode(msg) => write!(f, "decode auth header error: {msg}"),
            Self::Parse(msg) => write!(f, "parse auth header error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Parses the trusted identity header out of `headers`.
///
/// The bearer token is attached when the `Authorization` header is also
/// present; its absence is not an error.
pub fn user_from_headers(headers: &BTreeMap<String, String>) -> Result<User, AuthError> {
    let encoded = headers
        .get(AUTH_USER_HEADER)
        .ok_or(AuthError::MissingHeader)?;
    let decoded = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| AuthError::Decode(e.to_string()))?;
    let text =
        String::from_utf8(decoded).map_err(|e| AuthError::Decode(format!("invalid utf-8: {e}")))?;
    let pairs = form::parse_pairs(&text).map_err(|e| AuthError::Parse(e.to_string()))?;

    let mut user = User::default();
    for (key, value) in pairs {
        match key.as_str() {
            "user" => user.id = value,
            "role" => user.role = value,
            "tenant" => user.tenant = value,
            _ => {}
        }
    }
    if let Some(token) = headers.get(AUTHORIZATION_HEADER) {
        user.token = token.clone();
    }
    Ok(user)
}
