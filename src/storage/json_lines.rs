//! Append-only JSON Lines journal.
//!
//! One entry per line; an append writes a single line and flushes it.
//! A torn trailing line from an interrupted write is skipped on load.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::Result;
use crate::model::JournalEntry;
use super::{JournalStore, storage_error};

#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JournalStore for JsonLinesStore {
    fn load(&self) -> Vec<JournalEntry> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "journal not readable, starting empty");
                return Vec::new();
            }
        };
        let mut entries = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(path = %self.path.display(), line = lineno + 1, error = %e, "stopping at unreadable line");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(path = %self.path.display(), line = lineno + 1, error = %e, "skipping corrupt record");
                }
            }
        }
        entries
    }

    fn append(&self, entry: &JournalEntry) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error(dir, "create directory", e))?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| storage_error(&self.path, "open", e))?;
        f.write_all(line.as_bytes()).map_err(|e| storage_error(&self.path, "append to", e))?;
        f.flush().map_err(|e| storage_error(&self.path, "flush", e))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
