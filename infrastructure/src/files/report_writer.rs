//! Saving reports as markdown files.

use super::FileError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// `godel-judge-report-<ISO timestamp>.md` with `:` and `.` replaced by `-`
pub fn report_filename(timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("godel-judge-report-{stamp}.md")
}

/// Writes reports into a directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `report` to a new timestamped file and return its path
    pub fn save(&self, report: &str, timestamp: DateTime<Utc>) -> Result<PathBuf, FileError> {
        let path = self.dir.join(report_filename(timestamp));
        let write_err = |source| FileError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        std::fs::write(&path, report).map_err(write_err)?;

        info!("Saved report to {}", path.display());
        Ok(path)
    }
}
