//! JSONL file store for submission history.
//!
//! Each [`HistoryEntry`] is serialized as a single JSON line and appended to
//! the file. Records are read back oldest first; lines that do not parse
//! are skipped with a warning.

use godel_application::{HistoryEntry, HistoryError, HistoryStore};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// History store that keeps one JSON object per line.
///
/// Writes are serialized through a `Mutex` so concurrent appends never
/// interleave within a line.
pub struct JsonlHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlHistoryStore {
    /// Create a store backed by `path`.
    ///
    /// The file (and parent directories) are created on first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Get the path to the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistoryStore {
    fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let line = serde_json::to_string(entry)?;
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        debug!("Appended history record to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(
                    "Skipping malformed history record on line {} of {}: {}",
                    idx + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(entries)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(prompt: &str) -> HistoryEntry {
        HistoryEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 11, 20, 9, 30, 0).unwrap(),
            prompt: prompt.to_string(),
            judge: "ChatGPT 5.1".to_string(),
            workers: vec!["Claude 4.5 Sonnet".to_string(), "Grok 4".to_string()],
            output: "=== GÖDEL JUDGE ANALYSIS ===\n...".to_string(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlHistoryStore::new(dir.path().join("history.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlHistoryStore::new(dir.path().join("nested/dir/history.jsonl"));

        store.append(&entry("first")).unwrap();
        store.append(&entry("second")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], entry("first"));
        assert_eq!(loaded[1].prompt, "second");

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);
        let value: serde_json::Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
        assert_eq!(value["judge"], "ChatGPT 5.1");
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_clear_removes_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlHistoryStore::new(dir.path().join("history.jsonl"));
        store.append(&entry("q")).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let store = JsonlHistoryStore::new(&path);
        store.append(&entry("before")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(b"{not json\n")
            .unwrap();
        store.append(&entry("after")).unwrap();

        let loaded = store.load().unwrap();
        let prompts: Vec<_> = loaded.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["before", "after"]);
    }
}
