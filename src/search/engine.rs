// src/search/engine.rs

use crate::constants::{MAX_HIGHLIGHTS, MIN_QUERY_LEN};
use crate::format::escape_html;
use regex::RegexBuilder;
use serde::Serialize;
use std::ops::Range;

/// Tunables of the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    /// Queries with fewer characters (after trimming) never scan.
    pub min_query_len: usize,
    /// Occurrences past this many are counted but not highlighted.
    pub highlight_cap: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LEN,
            highlight_cap: MAX_HIGHLIGHTS,
        }
    }
}

/// The outcome of one scan.
///
/// `total_matches` is the true number of occurrences; `matches` holds the byte
/// ranges of the first `highlight_cap` of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub total_matches: usize,
    pub matches: Vec<Range<usize>>,
}

/// A run of text, either highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// Index into `SearchResult::matches` for highlighted segments.
    pub match_index: Option<usize>,
}

/// Returns the trimmed query if it is long enough to scan.
pub fn effective_query<'q>(query: &'q str, options: &SearchOptions) -> Option<&'q str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= options.min_query_len && !trimmed.is_empty()).then_some(trimmed)
}

/// Finds every case-insensitive, literal occurrence of `query` in `text`.
///
/// Short queries produce an empty result.
///
/// # Examples
/// ```
/// use logview::search::{search, SearchOptions};
///
/// let result = search("Error, error, ERROR", "error", &SearchOptions::default());
/// assert_eq!(result.total_matches, 3);
/// assert_eq!(result.matches[1], 7..12);
/// ```
pub fn search(text: &str, query: &str, options: &SearchOptions) -> SearchResult {
    let Some(needle) = effective_query(query, options) else {
        return SearchResult {
            query: query.trim().to_string(),
            ..Default::default()
        };
    };

    let re = match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            log::warn!("Could not build search pattern for '{}': {}", needle, e);
            return SearchResult {
                query: needle.to_string(),
                ..Default::default()
            };
        }
    };

    let mut total_matches = 0;
    let mut matches = Vec::new();
    for m in re.find_iter(text) {
        if matches.len() < options.highlight_cap {
            matches.push(m.range());
        }
        total_matches += 1;
    }
    log::debug!(
        "Search for '{}' found {} occurrences ({} highlighted)",
        needle,
        total_matches,
        matches.len()
    );

    SearchResult {
        query: needle.to_string(),
        total_matches,
        matches,
    }
}

impl SearchResult {
    /// Number of navigable (highlighted) matches.
    pub fn highlighted(&self) -> usize {
        self.matches.len()
    }

    /// Splits `text` into alternating plain and highlighted segments.
    ///
    /// `text` must be the text this result was computed from.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::with_capacity(self.matches.len() * 2 + 1);
        let mut cursor = 0;
        for (index, range) in self.matches.iter().enumerate() {
            if range.start > cursor {
                segments.push(Segment {
                    text: &text[cursor..range.start],
                    match_index: None,
                });
            }
            segments.push(Segment {
                text: &text[range.clone()],
                match_index: Some(index),
            });
            cursor = range.end;
        }
        if cursor < text.len() {
            segments.push(Segment {
                text: &text[cursor..],
                match_index: None,
            });
        }
        segments
    }

    /// Renders `text` as escaped HTML with `<mark>` around highlighted matches.
    ///
    /// The mark at `active` additionally carries the `current-highlight` class.
    pub fn to_html(&self, text: &str, active: Option<usize>) -> String {
        let mut out = String::with_capacity(text.len() + self.matches.len() * 48);
        for segment in self.segments(text) {
            match segment.match_index {
                None => out.push_str(&escape_html(segment.text)),
                Some(index) => {
                    let class = if Some(index) == active {
                        "search-highlight current-highlight"
                    } else {
                        "search-highlight"
                    };
                    out.push_str(&format!(
                        "<mark class=\"{}\" data-match=\"{}\">{}</mark>",
                        class,
                        index,
                        escape_html(segment.text)
                    ));
                }
            }
        }
        out
    }

    /// Zero-based indices of the lines of `text` containing highlighted matches.
    pub fn matched_line_indices(&self, text: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = Vec::new();
        let mut line = 0;
        let mut scanned = 0;
        for range in &self.matches {
            line += text[scanned..range.start].matches('\n').count();
            scanned = range.start;
            if indices.last() != Some(&line) {
                indices.push(line);
            }
        }
        indices
    }
}
