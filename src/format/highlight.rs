// src/format/highlight.rs

use crate::core_types::{Span, SpanTag};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Highlighting rules for log lines, in priority order.
static LOG_RULES: Lazy<Vec<(Regex, SpanTag)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\d{4}[-/]\d{2}[-/]\d{2}[\sT]\d{2}:\d{2}:\d{2}(?:\.\d{3})?(?:Z|[+-]\d{2}:\d{2})?")
                .unwrap(),
            SpanTag::Timestamp,
        ),
        (
            RegexBuilder::new(r"\b(?:ERROR|FATAL|SEVERE|WARN|WARNING|INFO|DEBUG|TRACE)\b")
                .case_insensitive(true)
                .build()
                .unwrap(),
            SpanTag::LevelKeyword,
        ),
        (
            Regex::new(r"\b[A-Z][a-zA-Z0-9]*(?:Exception|Error)\b").unwrap(),
            SpanTag::Exception,
        ),
        (
            Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").unwrap(),
            SpanTag::Ip,
        ),
        (Regex::new(r"https?://\S+").unwrap(), SpanTag::Url),
    ]
});

/// A match produced by one highlighting rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    range: Range<usize>,
    priority: usize,
    tag: SpanTag,
}

/// Splits a log line into tagged and untagged spans.
///
/// Every rule runs over the raw line. When matches overlap, the one starting
/// first wins; at equal starts the longer match wins, then the rule listed first.
/// A URL therefore keeps the IP address it contains.
///
/// Concatenating the span texts always yields `line` unchanged.
pub fn highlight_log_line(line: &str) -> Vec<Span> {
    let mut candidates: Vec<Candidate> = LOG_RULES
        .iter()
        .enumerate()
        .flat_map(|(priority, (re, tag))| {
            re.find_iter(line).map(move |m| Candidate {
                range: m.range(),
                priority,
                tag: *tag,
            })
        })
        .filter(|c| !c.range.is_empty())
        .collect();

    candidates.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| b.range.len().cmp(&a.range.len()))
            .then_with(|| a.priority.cmp(&b.priority))
    });

    let mut spans = Vec::new();
    let mut cursor = 0;
    for candidate in candidates {
        if candidate.range.start < cursor {
            continue;
        }
        if candidate.range.start > cursor {
            spans.push(Span::plain(&line[cursor..candidate.range.start]));
        }
        spans.push(Span::tagged(&line[candidate.range.clone()], candidate.tag));
        cursor = candidate.range.end;
    }
    if cursor < line.len() || spans.is_empty() {
        spans.push(Span::plain(&line[cursor..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(spans: &[Span]) -> Vec<(&str, SpanTag)> {
        spans
            .iter()
            .filter_map(|s| s.tags.first().map(|t| (s.text.as_str(), *t)))
            .collect()
    }

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_timestamp_and_level() {
        let line = "2024-01-01 10:00:00 ERROR db down";
        let spans = highlight_log_line(line);
        assert_eq!(joined(&spans), line);
        assert_eq!(
            tagged(&spans),
            vec![
                ("2024-01-01 10:00:00", SpanTag::Timestamp),
                ("ERROR", SpanTag::LevelKeyword)
            ]
        );
    }

    #[test]
    fn test_timestamp_with_millis_and_zone() {
        let spans = highlight_log_line("at 2024/03/05T01:02:03.456+08:00 ok");
        assert_eq!(
            tagged(&spans),
            vec![("2024/03/05T01:02:03.456+08:00", SpanTag::Timestamp)]
        );
    }

    #[test]
    fn test_level_keyword_is_case_insensitive_and_word_bounded() {
        let spans = highlight_log_line("Warning: info about INFORMATION");
        assert_eq!(
            tagged(&spans),
            vec![("Warning", SpanTag::LevelKeyword), ("info", SpanTag::LevelKeyword)]
        );
    }

    #[test]
    fn test_exception_names() {
        let spans = highlight_log_line("caught NullPointerException and IOError, not Error");
        assert_eq!(
            tagged(&spans),
            vec![
                ("NullPointerException", SpanTag::Exception),
                ("IOError", SpanTag::Exception),
                ("Error", SpanTag::LevelKeyword),
            ]
        );
    }

    #[test]
    fn test_ip_and_url() {
        let spans = highlight_log_line("peer 10.0.0.12 fetched https://10.0.0.1/api?q=1 done");
        assert_eq!(
            tagged(&spans),
            vec![
                ("10.0.0.12", SpanTag::Ip),
                ("https://10.0.0.1/api?q=1", SpanTag::Url)
            ]
        );
    }

    #[test]
    fn test_markup_is_kept_as_text() {
        let line = "<script>alert(1)</script> WARN";
        let spans = highlight_log_line(line);
        assert_eq!(joined(&spans), line);
        assert_eq!(spans[0].text, "<script>alert(1)</script> ");
        assert!(spans[0].tags.is_empty());
    }

    #[test]
    fn test_empty_line_yields_one_empty_span() {
        let spans = highlight_log_line("");
        assert_eq!(spans, vec![Span::plain("")]);
    }
}
