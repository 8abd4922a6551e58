//! Turns classified content into numbered, highlighted line records.
//!
//! The formatter is a pure function of its inputs. Log lines get a level tag and
//! span highlighting, JSON is pretty-printed before tokenizing, and plain text
//! is passed through as one untagged span per line.

use crate::core_types::{ContentClass, LevelTag, LineRecord, Span};
use rayon::prelude::*;
use serde::Serialize;

pub mod highlight;
pub mod json;
pub mod levels;
pub mod render;

pub use levels::detect_level;
pub use render::{escape_html, lines_to_html, spans_to_html};

/// The rendered form of one window of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedContent {
    /// The class actually used. Malformed JSON is reported as `Plain`.
    pub class: ContentClass,
    pub lines: Vec<LineRecord>,
    /// True only for log content; enables level filtering.
    pub is_log_like: bool,
    /// The text the lines were cut from: pretty-printed JSON or the input as is.
    #[serde(skip)]
    pub text: String,
}

impl FormattedContent {
    /// Renders the whole window as an HTML fragment.
    pub fn to_html(&self) -> String {
        lines_to_html(&self.lines, self.class)
    }
}

/// Splits content into lines.
///
/// Empty content has no lines, a single trailing newline does not open a new
/// line, and a trailing carriage return is removed from every line.
pub(crate) fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix('\n').unwrap_or(content);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Formats `content` as `class`, numbering lines from `offset + 1`.
///
/// # Examples
/// ```
/// use logview::core_types::{ContentClass, LevelTag};
/// use logview::format::format;
///
/// let formatted = format("WARN disk\nok", ContentClass::Log, 1000);
/// assert_eq!(formatted.lines[0].number, 1001);
/// assert_eq!(formatted.lines[0].level, LevelTag::Warn);
/// assert!(formatted.is_log_like);
/// ```
pub fn format(content: &str, class: ContentClass, offset: usize) -> FormattedContent {
    let (class, text) = match class {
        ContentClass::Json => match json::pretty_print(content) {
            Some(pretty) => (ContentClass::Json, pretty),
            None => (ContentClass::Plain, content.to_string()),
        },
        other => (other, content.to_string()),
    };

    let lines: Vec<LineRecord> = split_lines(&text)
        .par_iter()
        .enumerate()
        .map(|(index, line)| build_record(line, class, offset + index + 1))
        .collect();

    FormattedContent {
        class,
        is_log_like: class == ContentClass::Log,
        lines,
        text,
    }
}

fn build_record(line: &str, class: ContentClass, number: usize) -> LineRecord {
    let (spans, level) = match class {
        ContentClass::Log => (
            highlight::highlight_log_line(line),
            levels::detect_level(line),
        ),
        ContentClass::Json => (json::highlight_json_line(line), LevelTag::None),
        ContentClass::Plain => (vec![Span::plain(line)], LevelTag::None),
    };
    LineRecord {
        number,
        raw_text: line.to_string(),
        spans,
        level,
    }
}
