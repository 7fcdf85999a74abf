//! In-memory journal store.
//!
//! Reference implementation of `JournalStore`: a vector behind a
//! `RwLock`. Nothing survives the process.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::Result;
use crate::model::JournalEntry;
use super::JournalStore;

/// In-memory entry storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Vec<JournalEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalStore for MemoryStore {
    fn load(&self) -> Vec<JournalEntry> {
        self.entries.read().clone()
    }

    fn append(&self, entry: &JournalEntry) -> Result<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
