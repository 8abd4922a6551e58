// tests/common.rs

use std::fs;
use std::path::Path;
use std::process::Command;

// Helper function to get the binary command
#[allow(dead_code)] // Used by the CLI tests, not the library ones.
pub fn logview_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("logview"));
    cmd.env_remove("LOGVIEW_ROOT")
        .env_remove("LOGVIEW_MAX_SIZE")
        .env_remove("LOGVIEW_PORT");
    cmd
}

/// Writes `content` to `relative_path` under `dir`, creating parent directories.
#[allow(dead_code)]
pub fn create_file(dir_path: &Path, relative_path: &str, content: &str) -> std::io::Result<()> {
    let file_path = dir_path.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)
}

/// `count` numbered log lines, every tenth one an error.
#[allow(dead_code)]
pub fn numbered_log(count: usize) -> String {
    (1..=count)
        .map(|i| {
            let level = if i % 10 == 0 { "ERROR" } else { "INFO" };
            format!("2024-01-01 10:00:00 {} line {}\n", level, i)
        })
        .collect()
}
