//! Formatting utilities
//!
//! Helpers for rendering decoded values as display strings.

use std::fmt::Display;

use crate::tiff::constants::limits::RAW_PREVIEW_BYTES;

/// Joins displayable items with a single space
pub fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the first bytes of an opaque value
///
/// Printable ASCII content (trailing NULs allowed) is shown as text, anything
/// else as space-separated hex. Values longer than the preview are suffixed
/// with "...".
pub fn raw_preview(bytes: &[u8]) -> String {
    let shown = &bytes[..bytes.len().min(RAW_PREVIEW_BYTES)];
    let mut out = if is_printable_ascii(shown) {
        String::from_utf8_lossy(trim_trailing_nulls(shown)).into_owned()
    } else {
        hex(shown)
    };

    if bytes.len() > RAW_PREVIEW_BYTES {
        out.push_str("...");
    }
    out
}

/// Space-separated lower-case hex
pub fn hex(bytes: &[u8]) -> String {
    join(bytes.iter().map(|b| format!("{:02x}", b)))
}

/// Slice without its trailing NUL bytes
pub fn trim_trailing_nulls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

fn is_printable_ascii(bytes: &[u8]) -> bool {
    let content = trim_trailing_nulls(bytes);
    !content.is_empty() && content.iter().all(|&b| (0x20..0x7F).contains(&b))
}
