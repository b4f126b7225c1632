//! Basic authentication helpers.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::config::HEADER_AUTHORIZATION;
use crate::error_handling::ClientError;
use crate::message::Request;

/// Encodes `user[:password]` as a `Basic` credential value.
pub fn basic_header_value(user: &str, password: Option<&str>) -> String {
    let credentials = match password {
        Some(password) => format!("{user}:{password}"),
        None => format!("{user}:"),
    };
    format!("Basic {}", BASE64_STANDARD.encode(credentials.as_bytes()))
}

/// Returns `request` with an `Authorization: Basic ...` header, replacing
/// any previous `Authorization` value.
///
/// # Errors
///
/// Returns `ClientError::InvalidHeader` only if the header cannot be stored.
pub fn basic(request: Request, user: &str, password: Option<&str>) -> Result<Request, ClientError> {
    request.with_header(HEADER_AUTHORIZATION, &basic_header_value(user, password))
}

/// Splits a `Basic` credential value back into user and password.
///
/// Returns `None` for other schemes or undecodable payloads.
pub fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, payload) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64_STANDARD.decode(payload.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (user, password) = credentials.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}
