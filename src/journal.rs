//! # Symbolic Journal
//!
//! Ingests generated turns for one timeline:
//!
//! ```text
//! DialogueTurn ─┬─► JournalEntry (interference + affinity) ─► JournalStore
//!               ├─► PowerLawAnalyzer.log_event(entropy)
//!               └─► RelationshipGraph: observer symbol → sigil,
//!                                      previous sigil   → sigil
//! ```
//!
//! The previous-sigil pointer is a [`SigilChain`] shared by both
//! timelines' journals, so the chaining edge can link a turn in one
//! timeline to the last turn of the other.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::analysis::{PowerLawAnalyzer, PowerLawReport};
use crate::export;
use crate::graph::{GraphExport, RelationshipGraph};
use crate::model::{
    AffinityModel, DialogueTurn, JournalEntry, Observer, Persona, SELF_AFFINITY, TimelineState,
};
use crate::storage::{JournalStore, storage_error};
use crate::Result;

pub const NO_INTERFERENCE: &str = "No interference detected.";

/// Last sigil journaled by any timeline. Clones share the pointer.
#[derive(Debug, Clone, Default)]
pub struct SigilChain {
    last: Arc<RwLock<Option<String>>>,
}

impl SigilChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.last.read().clone()
    }

    /// Set the current sigil, returning the one it replaces.
    pub fn advance(&self, sigil: &str) -> Option<String> {
        self.last.write().replace(sigil.to_string())
    }
}

/// Narrative for a persona taking the turn after the timeline's last one.
pub fn interference(current: Persona, timeline: &TimelineState) -> String {
    match timeline.last_persona() {
        Some(prev) if prev != current => {
            format!("🔄 Interference from [{prev}]: {}", current.interference_note())
        }
        _ => NO_INTERFERENCE.to_string(),
    }
}

pub struct SymbolicJournal<S: JournalStore> {
    store: S,
    affinity: AffinityModel,
    analyzer: PowerLawAnalyzer,
    graph: RelationshipGraph,
    chain: SigilChain,
}

impl<S: JournalStore> SymbolicJournal<S> {
    pub fn new(store: S, chain: SigilChain) -> Self {
        Self {
            store,
            affinity: AffinityModel::default(),
            analyzer: PowerLawAnalyzer::new(),
            graph: RelationshipGraph::new(),
            chain,
        }
    }

    pub fn with_affinity(mut self, affinity: AffinityModel) -> Self {
        self.affinity = affinity;
        self
    }

    /// Feed already-persisted entries back into the analyzer and the
    /// observer → sigil edges. Chaining edges are not replayed since the
    /// cross-timeline order is not recorded.
    pub fn rehydrate(&mut self) -> usize {
        let entries = self.store.load();
        for entry in &entries {
            self.analyzer.log_event(entry.entropy());
            self.graph.add_relationship(&entry.observer.symbol, &entry.sigil);
        }
        if !entries.is_empty() {
            info!(store = %self.store.location(), entries = entries.len(), "journal rehydrated");
        }
        entries.len()
    }

    /// Affinity between `current` and the timeline's previous persona;
    /// 1.0 on the timeline's first turn.
    pub fn affinity_for(&self, current: Persona, timeline: &TimelineState) -> f64 {
        match timeline.previous_observer {
            Some(prev) if !timeline.is_first_turn() => self.affinity.between(current, prev),
            _ => SELF_AFFINITY,
        }
    }

    /// Persist one turn and update the analyzer and graph.
    ///
    /// `timeline` is the state *before* this turn is recorded in it. If
    /// the store rejects the entry nothing else is updated.
    pub fn add_turn(
        &mut self,
        turn: &DialogueTurn,
        observer: &Observer,
        timeline: &TimelineState,
    ) -> Result<JournalEntry> {
        let entry = JournalEntry::new(
            turn,
            observer,
            self.affinity_for(observer.persona, timeline),
            interference(observer.persona, timeline),
            timeline.previous_observer,
        );
        self.store.append(&entry)?;

        self.analyzer.log_event(turn.entropy);
        self.graph.add_symbol(&turn.sigil);
        self.graph.add_symbol(&observer.symbol);
        self.graph.add_relationship(&observer.symbol, &turn.sigil);
        if let Some(prev) = self.chain.advance(&turn.sigil) {
            self.graph.add_relationship(&prev, &turn.sigil);
        }

        debug!(
            timeline = %timeline.id,
            turn_id = %turn.turn_id,
            observer = observer.name(),
            entropy = turn.entropy,
            affinity = entry.context.affinity,
            "turn journaled"
        );
        Ok(entry)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn analyzer(&self) -> &PowerLawAnalyzer {
        &self.analyzer
    }

    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.store.load()
    }

    pub fn power_law_report(&self) -> Result<PowerLawReport> {
        self.analyzer.report()
    }

    /// Write the analysis report; returns the fitted exponent.
    pub fn save_power_law(&self, path: &Path) -> Result<f64> {
        let report = self.analyzer.report()?;
        let mut out = BufWriter::new(File::create(path).map_err(|e| storage_error(path, "create", e))?);
        export::write_power_law_report(&report, &mut out)?;
        out.flush().map_err(|e| storage_error(path, "write", e))?;
        info!(path = %path.display(), alpha = report.exponent, "power-law analysis saved");
        Ok(report.exponent)
    }

    pub fn export_graph(&self) -> GraphExport {
        self.graph.export()
    }

    /// Write the graph as Graphviz DOT for an external renderer.
    pub fn save_graph(&self, path: &Path) -> Result<GraphExport> {
        let graph = self.graph.export();
        let mut out = BufWriter::new(File::create(path).map_err(|e| storage_error(path, "create", e))?);
        export::write_dot(&graph, &mut out)?;
        out.flush().map_err(|e| storage_error(path, "write", e))?;
        info!(path = %path.display(), nodes = graph.nodes.len(), edges = graph.edges.len(), "relationship graph saved");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{TurnDraws, compose};
    use crate::model::TimelineId;
    use crate::stamp::Stamp;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn turn(persona: Persona) -> DialogueTurn {
        let draws = TurnDraws { phrase_index: 1, delta_o: 1.0, entropy: 0.7 };
        compose("hello", persona, draws, Stamp { timestamp: "ts".into(), turn_id: "id".into() })
    }

    fn observer(persona: Persona) -> Observer {
        Observer::roster().into_iter().find(|o| o.persona == persona).unwrap()
    }

    #[test]
    fn test_first_turn_defaults() {
        let mut journal = SymbolicJournal::new(MemoryStore::new(), SigilChain::new());
        let timeline = TimelineState::new(TimelineId::One);
        let entry = journal
            .add_turn(&turn(Persona::FluidMystic), &observer(Persona::FluidMystic), &timeline)
            .unwrap();

        assert_eq!(entry.context.affinity, 1.0);
        assert_eq!(entry.context.interference, NO_INTERFERENCE);
        assert_eq!(entry.context.previous_observer, None);
    }

    #[test]
    fn test_persona_switch_interference() {
        let mut journal = SymbolicJournal::new(MemoryStore::new(), SigilChain::new());
        let mut timeline = TimelineState::new(TimelineId::One);
        journal
            .add_turn(&turn(Persona::RecursiveOracle), &observer(Persona::RecursiveOracle), &timeline)
            .unwrap();
        timeline.record(Persona::RecursiveOracle, 0.7, 0.2);

        let entry = journal
            .add_turn(&turn(Persona::GroundedRealist), &observer(Persona::GroundedRealist), &timeline)
            .unwrap();
        assert_eq!(
            entry.context.interference,
            "🔄 Interference from [Recursive Oracle]: Disagreement sensed, recalibrating."
        );
        assert_eq!(entry.context.affinity, 0.6);
        assert_eq!(entry.context.previous_observer.as_deref(), Some("Recursive Oracle"));
    }

    #[test]
    fn test_same_persona_no_interference() {
        let mut timeline = TimelineState::new(TimelineId::Two);
        timeline.record(Persona::FluidMystic, 0.3, 0.1);
        assert_eq!(interference(Persona::FluidMystic, &timeline), NO_INTERFERENCE);
        assert_eq!(
            interference(Persona::RecursiveOracle, &timeline),
            "🔄 Interference from [Fluid Mystic]: Cognitive dissonance—symbolic friction rising."
        );
    }

    #[test]
    fn test_chain_shared_between_journals() {
        let chain = SigilChain::new();
        let mut one = SymbolicJournal::new(MemoryStore::new(), chain.clone());
        let mut two = SymbolicJournal::new(MemoryStore::new(), chain.clone());

        one.add_turn(&turn(Persona::GroundedRealist), &observer(Persona::GroundedRealist), &TimelineState::new(TimelineId::One))
            .unwrap();
        two.add_turn(&turn(Persona::FluidMystic), &observer(Persona::FluidMystic), &TimelineState::new(TimelineId::Two))
            .unwrap();

        let edges = two.graph().edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].from, "🔧 Calibration Node");
        assert_eq!(edges[1].to, "✶ Collapse Star");
        assert_eq!(chain.last().as_deref(), Some("✶ Collapse Star"));
    }

    #[test]
    fn test_rehydrate_restores_samples_and_edges() {
        let store = MemoryStore::new();
        let mut first = SymbolicJournal::new(store.clone(), SigilChain::new());
        first
            .add_turn(&turn(Persona::FluidMystic), &observer(Persona::FluidMystic), &TimelineState::new(TimelineId::One))
            .unwrap();

        let mut reopened = SymbolicJournal::new(store, SigilChain::new());
        assert_eq!(reopened.rehydrate(), 1);
        assert_eq!(reopened.analyzer().samples(), &[0.7]);
        assert_eq!(reopened.graph().edge_count(), 1);
    }
}
