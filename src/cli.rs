// src/cli.rs

use crate::constants::{DEFAULT_PAGE_SIZE, DEFAULT_PAGINATION_THRESHOLD};
use crate::filter::LevelFilter;
#[cfg(feature = "web")]
use crate::constants::DEFAULT_PORT;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse and search the files of a downloaded log bundle.
///
/// logview classifies each file as a log, JSON or plain text, highlights
/// timestamps, levels, exceptions, IP addresses and URLs, paginates large files
/// and runs case-insensitive searches over the loaded content. Use `show` to
/// render a file in the terminal or `serve` to browse the bundle in a browser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one file of the bundle to the terminal.
    Show(ShowArgs),
    /// Start the local web viewer.
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ViewerArgs {
    /// Directory of the extracted log bundle.
    #[arg(short = 'r', long, env = "LOGVIEW_ROOT", default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Number of lines per page for large files.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_name = "LINES")]
    pub page_size: usize,

    /// Files with more lines than this are paginated.
    #[arg(long, default_value_t = DEFAULT_PAGINATION_THRESHOLD, value_name = "LINES")]
    pub pagination_threshold: usize,

    /// Largest file to open (e.g., "50MB", "512KiB").
    #[arg(short = 'm', long, env = "LOGVIEW_MAX_SIZE", value_name = "BYTES")]
    pub max_size: Option<String>,

    /// Run searches on the calling thread instead of a background worker.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub inline_search: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Path of the file, relative to the bundle root.
    pub path: String,

    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Page to show for paginated files (1-based).
    #[arg(short = 'p', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub page: Option<u64>,

    /// Only show lines of this level: all, error, warn, info or debug.
    #[arg(short = 'l', long, default_value = "all", value_name = "LEVEL")]
    pub level: LevelFilter,

    /// Search the file and list the matching lines.
    #[arg(short = 's', long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print line records as JSON instead of text.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[cfg(feature = "web")]
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Port to listen on.
    #[arg(long, env = "LOGVIEW_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Do not open the browser automatically.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_open: bool,
}
