use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

/// Prefix used by the daily-rolling file appender; files land in the log
/// directory as `<LOG_FILE_PREFIX>.<YYYY-MM-DD>`.
pub const LOG_FILE_PREFIX: &str = "genibi-gateway.log";

pub trait LogRepository: Send + Sync {
    /// Dates (YYYY-MM-DD) that have a log file, newest first.
    fn get_logs(&self) -> Result<Vec<String>>;

    /// All lines of one day's log file.
    fn get_log(&self, date: &str) -> Result<Vec<String>>;
}

pub struct LogRepositoryImpl {
    dir: PathBuf,
}

impl LogRepositoryImpl {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LogRepositoryImpl { dir: dir.into() }
    }
}

impl LogRepository for LogRepositoryImpl {
    fn get_logs(&self) -> Result<Vec<String>> {
        let mut dates = Vec::new();

        // Missing directory means nothing was logged yet, not an error.
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(dates),
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(date) = name.strip_prefix(LOG_FILE_PREFIX).and_then(|s| s.strip_prefix('.')) {
                dates.push(date.to_string());
            }
        }

        dates.sort();
        dates.reverse();
        Ok(dates)
    }

    fn get_log(&self, date: &str) -> Result<Vec<String>> {
        // The date comes straight from the URL path; never let it name
        // anything outside the log directory.
        if date.is_empty() || !date.chars().all(|c| c.is_ascii_digit() || c == '-') {
            bail!("invalid log date: {date}");
        }

        let path = self.dir.join(format!("{LOG_FILE_PREFIX}.{date}"));
        let content = fs::read_to_string(&path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}
