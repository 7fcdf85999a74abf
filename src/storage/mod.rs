//! # Journal Storage
//!
//! The contract between the journal and wherever its entries live.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory, for tests and embedding |
//! | `JsonFileStore` | `json_file` | One JSON document, rewritten atomically per append |
//! | `JsonLinesStore` | `json_lines` | Append-only, one JSON record per line |
//!
//! ## Recovery policy
//!
//! A missing or unreadable store loads as an empty history. A failed
//! write is always returned to the caller as `Error::StorageError`.

pub mod memory;
pub mod json_file;
pub mod json_lines;

use std::path::Path;

use crate::model::JournalEntry;
use crate::{Error, Result};

pub use memory::MemoryStore;
pub use json_file::{JournalDocument, JsonFileStore};
pub use json_lines::JsonLinesStore;

/// Append-only entry storage.
pub trait JournalStore: Send + Sync {
    /// All entries in insertion order. Never fails: absent or corrupt
    /// content is an empty history.
    fn load(&self) -> Vec<JournalEntry>;

    /// Persist one more entry after the existing ones.
    fn append(&self, entry: &JournalEntry) -> Result<()>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;

    fn len(&self) -> usize {
        self.load().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: JournalStore + ?Sized> JournalStore for Box<T> {
    fn load(&self) -> Vec<JournalEntry> {
        (**self).load()
    }

    fn append(&self, entry: &JournalEntry) -> Result<()> {
        (**self).append(entry)
    }

    fn location(&self) -> String {
        (**self).location()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Wrap an I/O failure with the path it happened on.
pub(crate) fn storage_error(path: &Path, action: &str, err: impl std::fmt::Display) -> Error {
    Error::StorageError(format!("failed to {action} {}: {err}", path.display()))
}
