//! The `logview` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the `logview` library. By importing everything from this prelude, you
//! can open, page through and search content without spelling out module paths.
//!
//! # Example
//!
//! ```
//! use logview::prelude::*;
//! # fn main() -> Result<()> {
//!
//! let source = MemorySource::default();
//! source.insert("data.json", "{\"ok\":true}", DeclaredType::Json);
//! let payload = source.fetch("data.json", None)?;
//! let formatted = render_payload(&payload);
//! assert_eq!(formatted.lines.len(), 3);
//!
//! # Ok(())
//! # }
//! ```

pub use crate::classify::classify;
pub use crate::config::{ConfigBuilder, ViewerConfig};
pub use crate::coordinator::{FetchOutcome, FetchTicket, SessionOptions, ViewSession, ViewSnapshot};
pub use crate::core_types::{
    ContentClass, DeclaredType, FilePayload, LevelTag, LineRecord, Span, SpanTag, Window,
};
pub use crate::errors::{Error, Result};
pub use crate::filter::{filter_lines, LevelFilter};
pub use crate::format::{format, lines_to_html, FormattedContent};
pub use crate::pagination::{PageCommand, PaginationController, PaginationSnapshot};
pub use crate::render_payload;
pub use crate::search::{
    search, InlineBackend, SearchBackend, SearchOptions, SearchResult, SearchState,
    ThreadedBackend, WorkerMode,
};
pub use crate::source::{build_tree, ContentSource, FileNode, FsSource, MemorySource, WindowPolicy};
