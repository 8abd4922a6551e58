// src/config/validation.rs

use crate::errors::ConfigError;
use std::path::{Path, PathBuf};

/// Resolves the bundle root to an absolute, canonical directory path.
pub(super) fn resolve_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let resolved = root
        .canonicalize()
        .map_err(|_| ConfigError::InvalidRoot(root.display().to_string()))?;
    if !resolved.is_dir() {
        return Err(ConfigError::InvalidRoot(root.display().to_string()));
    }
    Ok(resolved)
}

/// Checks that page size and pagination threshold fit together.
pub(super) fn validate_paging(page_size: usize, threshold: usize) -> Result<(), ConfigError> {
    if threshold < page_size {
        return Err(ConfigError::InvalidValue {
            option: "--pagination-threshold".to_string(),
            reason: format!("must be at least the page size ({})", page_size),
        });
    }
    Ok(())
}
