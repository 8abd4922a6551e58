// src/format/json.rs

use crate::core_types::{Span, SpanTag};
use once_cell::sync::Lazy;
use regex::Regex;

static JSON_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(?:\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?"#)
        .unwrap()
});

/// Re-serializes a JSON document with two-space indentation.
///
/// Object keys keep their source order. Returns `None` when `content` does not
/// parse; callers fall back to plain rendering.
pub fn pretty_print(content: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => serde_json::to_string_pretty(&value).ok(),
        Err(e) => {
            log::debug!("Content is not valid JSON, rendering as plain text: {}", e);
            None
        }
    }
}

fn token_tag(token: &str) -> SpanTag {
    if token.starts_with('"') {
        if token.ends_with(':') {
            SpanTag::JsonKey
        } else {
            SpanTag::JsonString
        }
    } else if token == "true" || token == "false" {
        SpanTag::JsonBoolean
    } else if token == "null" {
        SpanTag::JsonNull
    } else {
        SpanTag::JsonNumber
    }
}

/// Splits one line of pretty-printed JSON into token spans.
///
/// A key span includes its trailing colon.
pub fn highlight_json_line(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for m in JSON_TOKEN.find_iter(line) {
        if m.is_empty() {
            continue;
        }
        if m.start() > cursor {
            spans.push(Span::plain(&line[cursor..m.start()]));
        }
        spans.push(Span::tagged(m.as_str(), token_tag(m.as_str())));
        cursor = m.end();
    }
    if cursor < line.len() || spans.is_empty() {
        spans.push(Span::plain(&line[cursor..]));
    }
    spans
}
