//! Selection of the authoritative message framing.

/// Returns the last non-empty framing of a header block.
///
/// Framings are separated by a blank line. Trailing empty fragments are
/// skipped, so a block ending in `\r\n\r\n` still yields its final message.
/// Bare `\n` line endings are accepted alongside `\r\n`.
pub fn last_framing(header_block: &str) -> Option<String> {
    let normalized = header_block.replace("\r\n", "\n");
    normalized
        .rsplit("\n\n")
        .map(str::trim)
        .find(|fragment| !fragment.is_empty())
        .map(str::to_string)
}
