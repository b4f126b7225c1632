//! Raw HTTP response parsing.
//!
//! This module turns the bytes returned by a transport into a `Response`:
//! - Splits the raw buffer at the header offset into header block and body
//! - Selects the last message framing when several are concatenated
//!   (interim `100 Continue` responses, redirects followed by the transport)
//! - Decodes the status line and header fields
//!
//! Parsing is strict: anything that cannot be decoded fails with
//! `ClientError::MalformedResponse` instead of being dropped.

mod framing;
mod lines;

use log::trace;

use crate::error_handling::ClientError;
use crate::message::{MessageFactory, Response};

pub use framing::last_framing;
pub use lines::{parse_header_line, parse_status_line, StatusLine};

/// Parses raw transport output into a `Response`.
///
/// # Arguments
///
/// * `factory` - Creates the empty response and the body stream
/// * `raw` - Status line, headers and body as received on the wire
/// * `header_size` - Byte offset where the body starts
///
/// # Errors
///
/// Returns `ClientError::MalformedResponse` if `header_size` lies outside
/// `raw`, the authoritative framing has no status line, any line cannot be
/// decoded, or a decoded header name or value is not valid on the wire.
pub fn parse_response<F>(factory: &F, raw: &[u8], header_size: usize) -> Result<Response, ClientError>
where
    F: MessageFactory + ?Sized,
{
    if header_size > raw.len() {
        return Err(ClientError::malformed(format!(
            "header size {} exceeds response length {}",
            header_size,
            raw.len()
        )));
    }

    let (header_bytes, body_bytes) = raw.split_at(header_size);
    let header_block = String::from_utf8_lossy(header_bytes);
    let framing = last_framing(&header_block)
        .ok_or_else(|| ClientError::malformed("response has no header block"))?;

    let mut response = factory.create_response();
    let mut saw_status_line = false;

    for line in framing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("http/")) {
            let status = parse_status_line(line)?;
            trace!("Status line: {} {}", status.version, status.code);
            response = response
                .with_status(status.code)
                .with_protocol_version(status.version);
            saw_status_line = true;
            continue;
        }

        let (name, value) = parse_header_line(line)?;
        trace!("Header: {}: {}", name, value);
        response = response
            .with_added_header(&name, &value)
            .map_err(|e| ClientError::malformed(format!("header line '{line}': {e}")))?;
    }

    if !saw_status_line {
        return Err(ClientError::malformed("missing status line"));
    }

    Ok(response.with_body(factory.create_stream_from_string(body_bytes)))
}
