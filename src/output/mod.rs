// src/output/mod.rs

//! Terminal rendering for `logview show`.
//!
//! `run_show` drives a `ViewSession` through the same steps the browser viewer
//! takes (open, page, search) and writes the result as numbered plain-text
//! lines, or as JSON for scripting.

use crate::config::ViewerConfig;
use crate::constants::SEARCH_WAIT;
use crate::core_types::LineRecord;
use crate::coordinator::{ViewSession, ViewSnapshot};
use crate::errors::{io_error_with_path, Result};
use crate::filter::LevelFilter;
use crate::pagination::PageCommand;
use crate::source::ContentSource;
use log::debug;
use serde::Serialize;
use std::io::Write;

pub mod terminal;

/// What to show, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ShowRequest {
    /// File path relative to the bundle root.
    pub path: String,
    /// One-based page; ignored for files shown whole.
    pub page: Option<usize>,
    pub level: LevelFilter,
    pub search: Option<String>,
    /// Emit JSON instead of numbered text.
    pub json: bool,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    view: ViewSnapshot,
    lines: Vec<&'a LineRecord>,
}

/// Renders one file of the bundle to `writer`.
///
/// # Errors
/// Returns the fetch error for unreadable, oversized or binary files, and
/// `Error::SearchDisabled` when `--search` is used on a paginated file.
pub fn run_show(config: &ViewerConfig, request: &ShowRequest, writer: &mut dyn Write) -> Result<()> {
    let source = config.fs_source()?;
    let mut session = ViewSession::new(source, config.session_options());
    session.open(&request.path)?;

    if let Some(page) = request.page.filter(|&p| p > 1) {
        let offset = (page - 1).saturating_mul(config.page_size);
        if !session.navigate(PageCommand::Goto(offset))? {
            debug!("Page {} is already shown or the file is not paginated", page);
        }
    }

    let level = effective_level(&session, request.level);

    let lines: Vec<&LineRecord> = match request.search.as_deref() {
        Some(query) => {
            session.search_now(query)?;
            if !session.wait_for_search(SEARCH_WAIT) && session.snapshot().search_pending {
                log::warn!("Search for '{}' did not finish in time", query);
            }
            matched_lines(&session)
                .into_iter()
                .filter(|line| level.matches(line.level))
                .collect()
        }
        None => session.filter(level),
    };

    let snapshot = session.snapshot();
    let written = if request.json {
        write_json(writer, &ShowReport { view: snapshot, lines })
    } else {
        write_text(writer, &request.path, &snapshot, &lines)
    };
    written.map_err(|e| io_error_with_path(e, "<output>"))
}

/// Level filtering only applies to log content; other files are shown unfiltered.
fn effective_level<S: ContentSource>(
    session: &ViewSession<S>,
    requested: LevelFilter,
) -> LevelFilter {
    let is_log_like = session.formatted().map(|f| f.is_log_like).unwrap_or(false);
    if requested != LevelFilter::All && !is_log_like {
        log::warn!("Level filter '{}' ignored: the file is not a log", requested);
        return LevelFilter::All;
    }
    requested
}

fn matched_lines<S: ContentSource>(session: &ViewSession<S>) -> Vec<&LineRecord> {
    let (Some(state), Some(text)) = (session.search_state(), session.current_text()) else {
        return Vec::new();
    };
    let lines = session.lines();
    state
        .result()
        .matched_line_indices(text)
        .into_iter()
        .filter_map(|index| lines.get(index))
        .collect()
}

fn write_json(writer: &mut dyn Write, report: &ShowReport<'_>) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

fn write_text(
    writer: &mut dyn Write,
    path: &str,
    snapshot: &ViewSnapshot,
    lines: &[&LineRecord],
) -> std::io::Result<()> {
    match snapshot.class {
        Some(class) => writeln!(writer, "## File: {} ({})", path, class)?,
        None => writeln!(writer, "## File: {}", path)?,
    }
    if snapshot.pagination.is_paginated {
        writeln!(
            writer,
            "-- Lines {}, page {} --",
            snapshot.pagination.range_label, snapshot.pagination.page_label
        )?;
    }

    let largest = lines.iter().map(|l| l.number).max().unwrap_or(0);
    let width = terminal::line_number_width(largest);
    terminal::write_lines(writer, lines.iter().copied(), width)?;

    if let Some(search) = &snapshot.search {
        if !search.query.is_empty() {
            writeln!(writer, "\n---")?;
            write!(writer, "Search \"{}\": {} matches", search.query, search.total_matches)?;
            if search.highlighted < search.total_matches {
                write!(writer, " (first {} highlighted)", search.highlighted)?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::search::WorkerMode;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn bundle() -> anyhow::Result<(TempDir, ViewerConfig)> {
        let temp = tempdir()?;
        fs::write(
            temp.path().join("app.log"),
            "2024-01-01 10:00:00 ERROR db down\n2024-01-01 10:00:01 INFO ok\n2024-01-01 10:00:02 ERROR db timeout\n",
        )?;
        fs::write(temp.path().join("data.json"), "{\"b\":2,\"a\":1}")?;
        let config = ConfigBuilder::new()
            .root(temp.path())
            .worker_mode(WorkerMode::Inline)
            .build()?;
        Ok((temp, config))
    }

    fn show(config: &ViewerConfig, request: ShowRequest) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run_show(config, &request, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_show_whole_log() -> anyhow::Result<()> {
        let (_temp, config) = bundle()?;
        let out = show(
            &config,
            ShowRequest {
                path: "app.log".into(),
                ..Default::default()
            },
        )?;
        assert!(out.starts_with("## File: app.log (log)\n"));
        assert!(out.contains("    1 | 2024-01-01 10:00:00 ERROR db down\n"));
        assert!(out.contains("    3 | 2024-01-01 10:00:02 ERROR db timeout\n"));
        assert!(!out.contains("-- Lines"));
        Ok(())
    }

    #[test]
    fn test_show_level_filter_keeps_numbers() -> anyhow::Result<()> {
        let (_temp, config) = bundle()?;
        let out = show(
            &config,
            ShowRequest {
                path: "app.log".into(),
                level: LevelFilter::Info,
                ..Default::default()
            },
        )?;
        assert!(out.contains("    2 | 2024-01-01 10:00:01 INFO ok\n"));
        assert!(!out.contains("ERROR"));
        Ok(())
    }

    #[test]
    fn test_show_search_lists_matching_lines() -> anyhow::Result<()> {
        let (_temp, config) = bundle()?;
        let out = show(
            &config,
            ShowRequest {
                path: "app.log".into(),
                search: Some("DB".into()),
                ..Default::default()
            },
        )?;
        assert!(out.contains("    1 | "));
        assert!(out.contains("    3 | "));
        assert!(!out.contains("    2 | "));
        assert!(out.ends_with("Search \"DB\": 2 matches\n"));
        Ok(())
    }

    #[test]
    fn test_show_json_pretty_prints() -> anyhow::Result<()> {
        let (_temp, config) = bundle()?;
        let out = show(
            &config,
            ShowRequest {
                path: "data.json".into(),
                level: LevelFilter::Error,
                ..Default::default()
            },
        )?;
        assert!(out.starts_with("## File: data.json (json)\n"));
        assert!(out.contains("    2 |   \"b\": 2,\n"));
        assert!(out.contains("    4 | }\n"));
        Ok(())
    }

    #[test]
    fn test_show_paginated_page() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let content: String = (1..=25).map(|i| format!("line {}\n", i)).collect();
        fs::write(temp.path().join("big.txt"), content)?;
        let config = ConfigBuilder::new()
            .root(temp.path())
            .page_size(10)
            .pagination_threshold(20)
            .worker_mode(WorkerMode::Inline)
            .build()?;
        let out = show(
            &config,
            ShowRequest {
                path: "big.txt".into(),
                page: Some(3),
                ..Default::default()
            },
        )?;
        assert!(out.contains("-- Lines 21 - 25 of 25, page 3 / 3 --\n"));
        assert!(out.contains("   21 | line 21\n"));
        assert!(!out.contains("line 20\n"));

        let err = run_show(
            &config,
            &ShowRequest {
                path: "big.txt".into(),
                search: Some("line".into()),
                ..Default::default()
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::errors::Error::SearchDisabled));
        Ok(())
    }

    #[test]
    fn test_show_json_report() -> anyhow::Result<()> {
        let (_temp, config) = bundle()?;
        let out = show(
            &config,
            ShowRequest {
                path: "app.log".into(),
                level: LevelFilter::Error,
                json: true,
                ..Default::default()
            },
        )?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["view"]["class"], "log");
        assert_eq!(value["lines"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["lines"][1]["number"], 3);
        Ok(())
    }
}
