// src/source/binary.rs

use crate::constants::BINARY_SNIFF_LEN;
use content_inspector::ContentType;

/// Checks if the head of a file looks like text.
///
/// Only the first `BINARY_SNIFF_LEN` bytes are inspected. `content_inspector`
/// decides between text and binary; for plain UTF-8 the head must also decode,
/// allowing for a multi-byte character cut off at the end of the sniffed range.
///
/// # Examples
/// ```
/// use logview::source::is_likely_text_from_buffer;
///
/// assert!(is_likely_text_from_buffer(b"2024-01-01 INFO started"));
/// assert!(!is_likely_text_from_buffer(b"PK\x03\x04\0\0zip"));
/// ```
pub fn is_likely_text_from_buffer(buffer: &[u8]) -> bool {
    let head = &buffer[..buffer.len().min(BINARY_SNIFF_LEN)];
    match content_inspector::inspect(head) {
        ContentType::UTF_8_BOM => true,
        ContentType::UTF_8 => match std::str::from_utf8(head) {
            Ok(_) => true,
            // A truncated trailing character is fine; anything else is not.
            Err(e) => e.error_len().is_none() && head.len() == BINARY_SNIFF_LEN,
        },
        _ => false,
    }
}
