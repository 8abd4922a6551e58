// src/config/builder.rs

use super::parsing::{parse_max_size, require_positive};
use super::validation::{resolve_root, validate_paging};
use super::ViewerConfig;
use crate::cli::ViewerArgs;
use crate::constants::{
    DEFAULT_MAX_FILE_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_PAGINATION_THRESHOLD, MAX_HIGHLIGHTS,
    MIN_QUERY_LEN, SEARCH_DEBOUNCE,
};
use crate::errors::Result;
use crate::search::{SearchOptions, WorkerMode};
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a `ViewerConfig` programmatically.
///
/// Every option is optional; `build()` fills in defaults, parses sizes and
/// validates the combination.
///
/// # Examples
/// ```no_run
/// use logview::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .root("/var/bundles/device-42")
///     .page_size(500)
///     .max_size("10MB")
///     .build()
///     .unwrap();
/// assert_eq!(config.page_size, 500);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    root: Option<PathBuf>,
    page_size: Option<usize>,
    pagination_threshold: Option<usize>,
    max_size: Option<String>,
    highlight_cap: Option<usize>,
    min_query_len: Option<usize>,
    debounce: Option<Duration>,
    worker_mode: Option<WorkerMode>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from the shared command-line options.
    pub fn from_viewer_args(args: &ViewerArgs) -> Self {
        let mut builder = Self::new()
            .root(args.root.clone())
            .page_size(args.page_size)
            .pagination_threshold(args.pagination_threshold);
        if let Some(size) = &args.max_size {
            builder = builder.max_size(size.clone());
        }
        if args.inline_search {
            builder = builder.worker_mode(WorkerMode::Inline);
        }
        builder
    }

    /// Directory of the extracted log bundle. Defaults to the current directory.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn pagination_threshold(mut self, lines: usize) -> Self {
        self.pagination_threshold = Some(lines);
        self
    }

    /// Maximum file size as a human-readable string, e.g. "50MB".
    pub fn max_size(mut self, size: impl Into<String>) -> Self {
        self.max_size = Some(size.into());
        self
    }

    pub fn highlight_cap(mut self, cap: usize) -> Self {
        self.highlight_cap = Some(cap);
        self
    }

    pub fn min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = Some(len);
        self
    }

    pub fn debounce(mut self, quiet_period: Duration) -> Self {
        self.debounce = Some(quiet_period);
        self
    }

    pub fn worker_mode(mut self, mode: WorkerMode) -> Self {
        self.worker_mode = Some(mode);
        self
    }

    /// Validates the options and produces the configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` for an unreadable root, a malformed size, a zero
    /// count, or a pagination threshold smaller than the page size.
    pub fn build(self) -> Result<ViewerConfig> {
        let root = resolve_root(&self.root.unwrap_or_else(|| PathBuf::from(".")))?;
        let page_size = require_positive("--page-size", self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))?;
        let pagination_threshold = require_positive(
            "--pagination-threshold",
            self.pagination_threshold
                .unwrap_or(DEFAULT_PAGINATION_THRESHOLD),
        )?;
        validate_paging(page_size, pagination_threshold)?;
        let max_file_size = match self.max_size.as_deref() {
            Some(size) => parse_max_size(size)?,
            None => DEFAULT_MAX_FILE_SIZE,
        };
        let highlight_cap = require_positive(
            "highlight cap",
            self.highlight_cap.unwrap_or(MAX_HIGHLIGHTS),
        )?;

        let config = ViewerConfig {
            root,
            page_size,
            pagination_threshold,
            max_file_size,
            search: SearchOptions {
                min_query_len: self.min_query_len.unwrap_or(MIN_QUERY_LEN),
                highlight_cap,
            },
            debounce: self.debounce.unwrap_or(SEARCH_DEBOUNCE),
            worker_mode: self.worker_mode.unwrap_or_default(),
        };
        log::debug!("Built configuration: {:?}", config);
        Ok(config)
    }
}
