// src/constants.rs

use std::time::Duration;

/// Number of lines in one pagination window.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Files with more lines than this are served in windows instead of whole.
pub const DEFAULT_PAGINATION_THRESHOLD: usize = 5000;

/// Largest file the content source will read (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Quiet period before a changed query triggers a scan.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest a caller blocks waiting for a background scan to finish.
pub const SEARCH_WAIT: Duration = Duration::from_secs(30);

/// Queries shorter than this (in characters, after trimming) never scan.
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of search occurrences that receive a highlight.
pub const MAX_HIGHLIGHTS: usize = 1000;

/// Default width for formatting line numbers. Actual width adjusts dynamically.
pub const DEFAULT_LINE_NUMBER_WIDTH: usize = 5;

/// Default port of the web viewer.
pub const DEFAULT_PORT: u16 = 5001;

/// Number of bytes inspected when deciding whether a file is binary.
pub const BINARY_SNIFF_LEN: usize = 1024;
