// src/search/state.rs

use super::engine::SearchResult;
use crate::format::escape_html;
use serde::Serialize;
use std::sync::Arc;

/// Search state of the file currently on screen.
///
/// Holds the text as it was before any search, the latest applied result and
/// the active match. The active match is always a valid index into the
/// highlighted matches, or `None` when there are none.
#[derive(Debug, Clone)]
pub struct SearchState {
    original_text: Arc<str>,
    result: SearchResult,
    current_match: Option<usize>,
}

/// Serializable summary of the search controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    /// True number of occurrences.
    pub total_matches: usize,
    /// Number of navigable highlights, at most the highlight cap.
    pub highlighted: usize,
    pub current_match: Option<usize>,
    /// `"{current} / {highlighted}"`, or `"0 / 0"` without matches.
    pub label: String,
}

impl SearchState {
    pub fn new(original_text: Arc<str>) -> Self {
        Self {
            original_text,
            result: SearchResult::default(),
            current_match: None,
        }
    }

    /// Installs a new result; the first match becomes active.
    pub fn apply(&mut self, result: SearchResult) {
        self.current_match = if result.matches.is_empty() {
            None
        } else {
            Some(0)
        };
        self.result = result;
    }

    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn query(&self) -> &str {
        &self.result.query
    }

    pub fn current_match(&self) -> Option<usize> {
        self.current_match
    }

    /// Advances to the next highlighted match, wrapping to the first.
    pub fn next(&mut self) -> Option<usize> {
        let n = self.result.highlighted();
        if n == 0 {
            return None;
        }
        let next = match self.current_match {
            Some(i) => (i + 1) % n,
            None => 0,
        };
        self.current_match = Some(next);
        self.current_match
    }

    /// Steps back to the previous highlighted match, wrapping to the last.
    pub fn previous(&mut self) -> Option<usize> {
        let n = self.result.highlighted();
        if n == 0 {
            return None;
        }
        let prev = match self.current_match {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        };
        self.current_match = Some(prev);
        self.current_match
    }

    /// Drops the result and hands back the untouched text.
    pub fn clear(&mut self) -> Arc<str> {
        self.result = SearchResult::default();
        self.current_match = None;
        Arc::clone(&self.original_text)
    }

    pub fn original_text(&self) -> &Arc<str> {
        &self.original_text
    }

    /// The text as currently displayed: highlighted when there are matches,
    /// otherwise just escaped.
    pub fn to_html(&self) -> String {
        if self.result.matches.is_empty() {
            escape_html(&self.original_text)
        } else {
            self.result.to_html(&self.original_text, self.current_match)
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let highlighted = self.result.highlighted();
        let label = match self.current_match {
            Some(i) => format!("{} / {}", i + 1, highlighted),
            None => "0 / 0".to_string(),
        };
        SearchSnapshot {
            query: self.result.query.clone(),
            total_matches: self.result.total_matches,
            highlighted,
            current_match: self.current_match,
            label,
        }
    }
}
