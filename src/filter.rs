// src/filter.rs

use crate::core_types::{LevelTag, LineRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Level filter applied to a rendered log window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    #[default]
    All,
    Error,
    Warn,
    Info,
    Debug,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown level filter '{0}' (expected one of: all, error, warn, info, debug)")]
pub struct ParseLevelError(pub String);

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(LevelFilter::All),
            "error" => Ok(LevelFilter::Error),
            "warn" | "warning" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LevelFilter::All => "all",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
        })
    }
}

impl LevelFilter {
    /// Whether a line tagged `level` passes the filter.
    pub fn matches(&self, level: LevelTag) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Error => level == LevelTag::Error,
            LevelFilter::Warn => level == LevelTag::Warn,
            LevelFilter::Info => level == LevelTag::Info,
            LevelFilter::Debug => level == LevelTag::Debug,
        }
    }
}

/// Returns the lines passing `filter`, in their original order.
pub fn filter_lines(lines: &[LineRecord], filter: LevelFilter) -> Vec<&LineRecord> {
    lines.iter().filter(|line| filter.matches(line.level)).collect()
}
