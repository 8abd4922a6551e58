//! `logview` is a library and command-line tool for browsing the files of a
//! downloaded log bundle: plain-text logs, JSON documents and anything else
//! textual.
//!
//! Content goes through a small pipeline:
//! 1.  **Fetch**: a [`ContentSource`] delivers a file whole, or one window of
//!     lines for large files.
//! 2.  **Classify**: the file is treated as JSON, a log, or plain text.
//! 3.  **Format**: lines are numbered and highlighted into structured spans
//!     (timestamps, levels, exceptions, IPs, URLs, JSON tokens).
//!
//! A [`ViewSession`] ties these together with pagination, a level filter and a
//! debounced, case-insensitive search that runs on a background worker.
//!
//! # Example: Library Usage
//!
//! ```
//! use logview::prelude::*;
//!
//! let source = MemorySource::default();
//! source.insert(
//!     "app.log",
//!     "2024-01-01 10:00:00 ERROR db down\n2024-01-01 10:00:01 INFO ok\n",
//!     DeclaredType::Text,
//! );
//!
//! let options = SessionOptions {
//!     worker_mode: WorkerMode::Inline,
//!     ..Default::default()
//! };
//! let mut view = ViewSession::new(source, options);
//! view.open("app.log").unwrap();
//! assert_eq!(view.formatted().unwrap().class, ContentClass::Log);
//! assert_eq!(view.filter(LevelFilter::Error).len(), 1);
//!
//! view.search_now("db").unwrap();
//! assert_eq!(view.snapshot().search.unwrap().total_matches, 1);
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod core_types;
pub mod errors;
pub mod filter;
pub mod format;
pub mod output;
pub mod pagination;
pub mod prelude;
pub mod search;
pub mod source;
#[cfg(feature = "web")]
pub mod web;

// Re-export key public types for easier use as a library
pub use config::{ConfigBuilder, ViewerConfig};
pub use coordinator::{SessionOptions, ViewSession};
pub use core_types::{ContentClass, DeclaredType, FilePayload, LineRecord};
pub use format::FormattedContent;
pub use source::ContentSource;

/// Classifies and formats a fetched payload in one step.
///
/// Lines are numbered from the payload's offset, so a window renders with the
/// numbers its lines have in the whole file.
///
/// # Examples
/// ```
/// use logview::{render_payload, ContentClass, DeclaredType, FilePayload};
///
/// let payload = FilePayload::whole("data.json", "{\"b\":2,\"a\":1}", DeclaredType::Json);
/// let formatted = render_payload(&payload);
/// assert_eq!(formatted.class, ContentClass::Json);
/// assert_eq!(formatted.lines.len(), 4);
/// assert_eq!(formatted.lines[1].raw_text, "  \"b\": 2,");
/// ```
pub fn render_payload(payload: &FilePayload) -> FormattedContent {
    let class = classify::classify(payload.declared_type, payload.file_name(), &payload.content);
    format::format(&payload.content, class, payload.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_window_numbers_from_offset() {
        let payload = FilePayload::window("big.log", "INFO a\nWARN b", DeclaredType::Text, 2000, 2500);
        let formatted = render_payload(&payload);
        assert_eq!(formatted.class, ContentClass::Log);
        assert_eq!(formatted.lines[0].number, 2001);
        assert_eq!(formatted.lines[1].number, 2002);
    }

    #[test]
    fn test_render_malformed_json_as_plain() {
        let payload = FilePayload::whole("broken.json", "{\"a\":", DeclaredType::Json);
        let formatted = render_payload(&payload);
        assert_eq!(formatted.class, ContentClass::Plain);
        assert_eq!(formatted.lines.len(), 1);
        assert_eq!(formatted.lines[0].raw_text, "{\"a\":");
    }
}
