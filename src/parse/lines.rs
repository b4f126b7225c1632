//! Status line and header field decoding.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error_handling::ClientError;

/// Decoded `HTTP/<version> <code> <reason>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Version without the `HTTP/` prefix, e.g. `1.1`
    pub version: String,
    pub code: u16,
    pub reason: String,
}

/// Parses a status line.
///
/// # Errors
///
/// Returns `ClientError::MalformedResponse` when the version, the code or
/// the reason phrase is missing, or the code is not a three-digit number.
pub fn parse_status_line(line: &str) -> Result<StatusLine, ClientError> {
    let mut parts = line.splitn(3, ' ');
    let protocol = parts.next().unwrap_or_default();
    let code = parts
        .next()
        .ok_or_else(|| ClientError::malformed(format!("status line without code: '{line}'")))?;
    let reason = parts.next().map(str::trim).unwrap_or_default();
    if reason.is_empty() {
        return Err(ClientError::malformed(format!(
            "status line without reason phrase: '{line}'"
        )));
    }

    let version = protocol.get(5..).unwrap_or_default();
    if version.is_empty() {
        return Err(ClientError::malformed(format!(
            "status line without protocol version: '{line}'"
        )));
    }

    let code = code
        .parse::<u16>()
        .ok()
        .filter(|c| (100..1000).contains(c))
        .ok_or_else(|| ClientError::malformed(format!("invalid status code '{code}'")))?;

    Ok(StatusLine {
        version: version.to_string(),
        code,
        reason: reason.to_string(),
    })
}

/// Splits a header line on its first `:` and percent-decodes name and value.
///
/// # Errors
///
/// Returns `ClientError::MalformedResponse` for a line without `:` or with an
/// empty name.
pub fn parse_header_line(line: &str) -> Result<(String, String), ClientError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ClientError::malformed(format!("header line without ':': '{line}'")))?;

    let name = decode(name.trim());
    if name.is_empty() {
        return Err(ClientError::malformed(format!(
            "header line without name: '{line}'"
        )));
    }
    Ok((name.into_owned(), decode(value.trim()).into_owned()))
}

fn decode(text: &str) -> Cow<'_, str> {
    percent_decode_str(text).decode_utf8_lossy()
}
