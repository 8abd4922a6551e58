// src/config/parsing.rs

use crate::errors::ConfigError;
use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size ("50MB", "512KiB", "1024") into bytes.
///
/// # Examples
/// ```
/// use logview::config::parse_max_size;
///
/// assert_eq!(parse_max_size("2MiB").unwrap(), 2 * 1024 * 1024);
/// assert!(parse_max_size("lots").is_err());
/// ```
pub fn parse_max_size(input: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        option: "--max-size".to_string(),
        reason,
    };
    let bytes = Byte::from_str(input.trim())
        .map_err(|e| invalid(format!("invalid size format '{}': {}", input, e)))?;
    let bytes = u64::try_from(bytes.as_u128())
        .map_err(|_| invalid(format!("size '{}' is too large", input)))?;
    if bytes == 0 {
        return Err(invalid("must be greater than 0".to_string()));
    }
    Ok(bytes)
}

/// Checks that a count option is positive.
pub(super) fn require_positive(option: &str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            option: option.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(value)
}
