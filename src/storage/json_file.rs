//! Whole-document JSON journal.
//!
//! Each append reads the document, pushes the entry and writes the full
//! document to `<file>.tmp` before renaming it over the original. A crash
//! mid-write leaves the previous document intact. Cost per append is
//! linear in the number of entries, and concurrent writers lose updates.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Result;
use crate::model::JournalEntry;
use super::{JournalStore, storage_error};

/// On-disk layout: `{"journal": [entry, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalDocument {
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> JournalDocument {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "journal not readable, starting empty");
                return JournalDocument::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "journal is corrupt, starting empty");
                JournalDocument::default()
            }
        }
    }

    fn write_document(&self, doc: &JournalDocument) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error(dir, "create directory", e))?;
        }
        let tmp = self.tmp_path();
        let body = serde_json::to_string_pretty(doc)?;
        let result = Self::write_tmp(&tmp, body.as_bytes())
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, "replace", e)));
        if result.is_err() && tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %e, "could not remove temporary journal");
            }
        }
        result
    }

    fn write_tmp(tmp: &Path, body: &[u8]) -> Result<()> {
        let mut f = File::create(tmp).map_err(|e| storage_error(tmp, "create", e))?;
        f.write_all(body).map_err(|e| storage_error(tmp, "write", e))?;
        f.sync_all().map_err(|e| storage_error(tmp, "sync", e))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl JournalStore for JsonFileStore {
    fn load(&self) -> Vec<JournalEntry> {
        self.read_document().journal
    }

    fn append(&self, entry: &JournalEntry) -> Result<()> {
        let mut doc = self.read_document();
        doc.journal.push(entry.clone());
        self.write_document(&doc)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
