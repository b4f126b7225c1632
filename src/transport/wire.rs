//! HTTP/1.x wire framing.

/// Renders a response as HTTP/1.x wire bytes.
///
/// Returns the bytes and the offset at which the body starts. Each header
/// value gets its own line.
pub fn serialize_response<'a, I>(
    version: &str,
    status: u16,
    reason: &str,
    headers: I,
    body: &[u8],
) -> (Vec<u8>, usize)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut head = format!("HTTP/{version} {status} {reason}\r\n");
    for (name, value) in headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    let header_size = head.len();
    let mut raw = head.into_bytes();
    raw.extend_from_slice(body);
    (raw, header_size)
}
