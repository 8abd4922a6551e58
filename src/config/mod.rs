//! Defines the `ViewerConfig` struct for application configuration.
//!
//! This module consolidates all the settings parsed and validated from the CLI
//! (and their environment fallbacks), making them available to the content
//! source, the view session and the web server in a structured, type-safe way.

use crate::constants::SEARCH_WAIT;
use crate::coordinator::SessionOptions;
use crate::errors::Result;
use crate::search::{SearchOptions, WorkerMode};
use crate::source::{FsSource, WindowPolicy};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
mod parsing;
mod validation;

pub use parsing::parse_max_size;

/// Validated settings of a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerConfig {
    /// Canonical path of the extracted log bundle.
    pub root: PathBuf,
    /// Lines per pagination window.
    pub page_size: usize,
    /// Files with more lines than this are paginated.
    pub pagination_threshold: usize,
    /// Largest file the viewer will read, in bytes.
    pub max_file_size: u64,
    pub search: SearchOptions,
    /// Quiet period before a changed query is scanned.
    #[serde(skip)]
    pub debounce: Duration,
    pub worker_mode: WorkerMode,
}

impl ViewerConfig {
    /// Options for a `ViewSession` using this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            page_size: self.page_size,
            search: self.search,
            debounce: self.debounce,
            search_wait: SEARCH_WAIT,
            worker_mode: self.worker_mode,
        }
    }

    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy {
            pagination_threshold: self.pagination_threshold,
            page_size: self.page_size,
        }
    }

    /// A filesystem content source over the bundle root.
    pub fn fs_source(&self) -> Result<FsSource> {
        FsSource::new(&self.root, self.max_file_size, self.window_policy())
    }
}
