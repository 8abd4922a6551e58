// src/source/fs.rs

use super::binary::is_likely_text_from_buffer;
use super::detect::detect_declared_type;
use super::tree::{build_tree, FileNode};
use super::{ContentSource, WindowPolicy};
use crate::core_types::{FilePayload, Window};
use crate::errors::{io_error_with_path, Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Serves files from an extracted log bundle on disk.
///
/// Every requested path is relative to the bundle root and must resolve to a
/// regular file inside it, symlinks included.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    max_file_size: u64,
    policy: WindowPolicy,
}

impl FsSource {
    /// Creates a source rooted at `root`, which is canonicalized.
    ///
    /// # Errors
    /// Returns `Error::Io` if the root cannot be resolved.
    pub fn new(root: &Path, max_file_size: u64, policy: WindowPolicy) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|e| io_error_with_path(e, root))?;
        Ok(Self {
            root,
            max_file_size,
            policy,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file tree of the whole bundle.
    pub fn tree(&self) -> Result<FileNode> {
        build_tree(&self.root)
    }

    /// Maps a bundle-relative path to an absolute path inside the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let invalid = || Error::InvalidPath(relative.to_string());
        let trimmed = relative.trim();
        if trimmed.is_empty() || trimmed.contains('\0') {
            return Err(invalid());
        }
        let normalized = trimmed.replace('\\', "/");
        let candidate = Path::new(&normalized);
        for component in candidate.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    log::warn!("Rejected path outside the bundle: '{}'", relative);
                    return Err(invalid());
                }
            }
        }

        let joined = self.root.join(candidate);
        let resolved = joined
            .canonicalize()
            .map_err(|e| io_error_with_path(e, relative))?;
        if !resolved.starts_with(&self.root) {
            log::warn!("Path '{}' resolves outside the bundle root", relative);
            return Err(invalid());
        }
        Ok(resolved)
    }
}

impl ContentSource for FsSource {
    fn fetch(&self, path: &str, window: Option<Window>) -> Result<FilePayload> {
        let absolute = self.resolve(path)?;
        let metadata = fs::metadata(&absolute).map_err(|e| io_error_with_path(e, path))?;
        if !metadata.is_file() {
            return Err(Error::NotAFile(path.to_string()));
        }
        if metadata.len() > self.max_file_size {
            return Err(Error::FileTooLarge {
                path: path.to_string(),
                size: metadata.len(),
                limit: self.max_file_size,
            });
        }

        let bytes = fs::read(&absolute).map_err(|e| io_error_with_path(e, path))?;
        if !is_likely_text_from_buffer(&bytes) {
            return Err(Error::BinaryContent(path.to_string()));
        }
        let content = String::from_utf8_lossy(&bytes);
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content).to_string();

        let file_name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let declared = detect_declared_type(&file_name, &content);
        let display_path = path.trim().replace('\\', "/");

        let mut payload = self.policy.apply(&display_path, content, declared, window);
        payload.size = metadata.len();
        Ok(payload)
    }
}
