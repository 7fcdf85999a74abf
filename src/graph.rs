//! Directed symbol graph accumulated from journal turns.
//!
//! Nodes are deduplicated by symbol; edges never are. Layout and
//! rendering belong to whoever consumes [`GraphExport`].

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{EdgeId, SymbolEdge};

/// Node/edge list handed to an external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Symbols in first-seen order.
    pub nodes: Vec<String>,
    /// Edges in insertion order.
    pub edges: Vec<SymbolEdge>,
}

#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    seen: HashSet<String>,
    nodes: Vec<String>,
    edges: Vec<SymbolEdge>,
    next_edge_id: u64,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `symbol` if absent. Returns true if it was new.
    pub fn add_symbol(&mut self, symbol: &str) -> bool {
        if self.seen.contains(symbol) {
            return false;
        }
        self.seen.insert(symbol.to_string());
        self.nodes.push(symbol.to_string());
        true
    }

    /// Append a `from → to` edge with the next id, adding both ends.
    pub fn add_relationship(&mut self, from: &str, to: &str) -> EdgeId {
        self.add_symbol(from);
        self.add_symbol(to);
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(SymbolEdge::new(id, from, to));
        id
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.seen.contains(symbol)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[SymbolEdge] {
        &self.edges
    }

    /// Edges leaving `symbol`, in insertion order.
    pub fn outgoing<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a SymbolEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == symbol)
    }

    pub fn export(&self) -> GraphExport {
        GraphExport { nodes: self.nodes.clone(), edges: self.edges.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_symbol_idempotent() {
        let mut g = RelationshipGraph::new();
        assert!(g.add_symbol("A"));
        assert!(!g.add_symbol("A"));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_edges_never_deduplicated() {
        let mut g = RelationshipGraph::new();
        let a = g.add_relationship("A", "B");
        let b = g.add_relationship("A", "B");
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.outgoing("A").count(), 2);
    }

    #[test]
    fn test_export_keeps_order() {
        let mut g = RelationshipGraph::new();
        g.add_relationship("x", "y");
        g.add_relationship("z", "x");
        let out = g.export();
        assert_eq!(out.nodes, vec!["x", "y", "z"]);
        assert_eq!(out.edges[1].label(), "e1");
        assert_eq!(out.edges[1].other_end("x"), Some("z"));
    }
}
