//! Content sources: where file payloads come from.
//!
//! The view session only talks to the `ContentSource` trait. `FsSource` reads an
//! extracted log bundle from disk; `MemorySource` serves fixed content and is
//! what tests and embedders use.

use crate::core_types::{DeclaredType, FilePayload, Window};
use crate::errors::{Error, Result};
use crate::format::split_lines;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

mod binary;
pub mod detect;
pub mod fs;
pub mod tree;

pub use binary::is_likely_text_from_buffer;
pub use detect::detect_declared_type;
pub use fs::FsSource;
pub use tree::{build_tree, FileNode, NodeKind};

/// Supplies raw file content, whole or as a line window.
pub trait ContentSource {
    /// Fetches `path`.
    ///
    /// Without a window, small files come back whole and large ones as their
    /// first window. With a window, the response is always windowed and carries
    /// `total_lines`.
    fn fetch(&self, path: &str, window: Option<Window>) -> Result<FilePayload>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn fetch(&self, path: &str, window: Option<Window>) -> Result<FilePayload> {
        (**self).fetch(path, window)
    }
}

/// Windowing rules shared by the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    /// Files with more lines than this are windowed even when no window is asked for.
    pub pagination_threshold: usize,
    pub page_size: usize,
}

impl WindowPolicy {
    /// Cuts `content` into the payload a fetch should return.
    ///
    /// Requested offsets past the end are clamped to the last page, and every
    /// offset is aligned down to a multiple of the window limit.
    pub fn apply(
        &self,
        path: &str,
        content: String,
        declared_type: DeclaredType,
        window: Option<Window>,
    ) -> FilePayload {
        let size = content.len() as u64;
        let lines = split_lines(&content);
        let total = lines.len();

        let window = match window {
            Some(w) => w,
            None if total > self.pagination_threshold => Window {
                offset: 0,
                limit: self.page_size,
            },
            None => {
                return FilePayload {
                    size,
                    ..FilePayload::whole(path, content, declared_type)
                }
            }
        };

        let limit = if window.limit == 0 {
            self.page_size
        } else {
            window.limit
        };
        let last_offset = if total == 0 {
            0
        } else {
            (total - 1) / limit * limit
        };
        let offset = (window.offset / limit * limit).min(last_offset);
        let end = (offset + limit).min(total);
        let body = lines
            .get(offset..end)
            .map(|slice| slice.join("\n"))
            .unwrap_or_default();

        log::debug!(
            "Serving '{}' lines {}..{} of {}",
            path,
            offset,
            end,
            total
        );
        FilePayload {
            size,
            ..FilePayload::window(path, body, declared_type, offset, total)
        }
    }
}

/// An in-memory source keyed by path.
///
/// Paths registered with [`MemorySource::fail`] return
/// `Error::ContentUnavailable` with the given message.
#[derive(Debug)]
pub struct MemorySource {
    policy: WindowPolicy,
    files: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug, Clone)]
enum Entry {
    File(String, DeclaredType),
    Failure(String),
}

impl MemorySource {
    pub fn new(pagination_threshold: usize, page_size: usize) -> Self {
        Self {
            policy: WindowPolicy {
                pagination_threshold,
                page_size,
            },
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>, declared: DeclaredType) {
        self.entries()
            .insert(path.into(), Entry::File(content.into(), declared));
    }

    /// Makes every fetch of `path` fail with `message`.
    pub fn fail(&self, path: impl Into<String>, message: impl Into<String>) {
        self.entries()
            .insert(path.into(), Entry::Failure(message.into()));
    }

    // A panic while holding the lock leaves the map itself intact.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of lines stored for `path`, if it is a file.
    pub fn line_count(&self, path: &str) -> Option<usize> {
        match self.entries().get(path)? {
            Entry::File(content, _) => Some(split_lines(content).len()),
            Entry::Failure(_) => None,
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_PAGINATION_THRESHOLD,
            crate::constants::DEFAULT_PAGE_SIZE,
        )
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, path: &str, window: Option<Window>) -> Result<FilePayload> {
        let entry = self.entries().get(path).cloned();
        match entry {
            Some(Entry::File(content, declared)) => {
                Ok(self.policy.apply(path, content, declared, window))
            }
            Some(Entry::Failure(message)) => Err(Error::ContentUnavailable {
                path: path.to_string(),
                message,
            }),
            None => Err(Error::ContentUnavailable {
                path: path.to_string(),
                message: format!("File not found: {}", path),
            }),
        }
    }
}
