// src/format/levels.rs

use crate::core_types::LevelTag;

// Checked in order; the first tier with a hit decides the tag.
const TIERS: [(&[&str], LevelTag); 4] = [
    (&["ERROR", "FATAL", "SEVERE"], LevelTag::Error),
    (&["WARN", "WARNING"], LevelTag::Warn),
    (&["INFO"], LevelTag::Info),
    (&["DEBUG", "TRACE"], LevelTag::Debug),
];

/// Tags a log line with its severity.
///
/// The line is upper-cased and searched for substrings, so `errors` and
/// `Information` count as well.
pub fn detect_level(line: &str) -> LevelTag {
    let upper = line.to_uppercase();
    TIERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| upper.contains(needle)))
        .map(|(_, tag)| *tag)
        .unwrap_or(LevelTag::None)
}
