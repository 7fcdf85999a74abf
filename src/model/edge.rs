//! Directed edge between two symbols in the relationship graph.

use serde::{Deserialize, Serialize};

/// Edge identifier. Issued in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A directed `from → to` edge. Repeated pairs are distinct edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEdge {
    pub id: EdgeId,
    pub from: String,
    pub to: String,
}

impl SymbolEdge {
    pub fn new(id: EdgeId, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { id, from: from.into(), to: to.into() }
    }

    pub fn label(&self) -> String {
        self.id.to_string()
    }

    /// The "other" end of the edge from the given symbol.
    pub fn other_end(&self, symbol: &str) -> Option<&str> {
        if symbol == self.from { Some(&self.to) }
        else if symbol == self.to { Some(&self.from) }
        else { None }
    }
}
