//! Persisted journal entries.
//!
//! Field names follow the on-disk document: a turn flattened next to a
//! `context` block, a `metrics` block and an `observer` snapshot.

use serde::{Deserialize, Serialize};

use super::{DialogueTurn, Mode, Observer, Persona, TagSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnContext {
    pub affinity: f64,
    pub interference: String,
    pub previous_observer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnMetrics {
    #[serde(rename = "delta_O")]
    pub delta_o: f64,
    pub entropy: f64,
}

/// Full trait snapshot of the acting observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverSnapshot {
    pub belief_field: f64,
    pub modulation_strength: f64,
    pub name: String,
    pub perceptual_bandwidth: f64,
    pub symbol: String,
}

impl From<&Observer> for ObserverSnapshot {
    fn from(o: &Observer) -> Self {
        Self {
            belief_field: o.belief_field,
            modulation_strength: o.modulation_strength,
            name: o.name().to_string(),
            perceptual_bandwidth: o.perceptual_bandwidth,
            symbol: o.symbol.clone(),
        }
    }
}

/// One append-only journal record. Never edited after it is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub context: TurnContext,
    pub input: String,
    pub message: String,
    pub metrics: TurnMetrics,
    pub mode: Mode,
    pub observer: ObserverSnapshot,
    pub response: String,
    pub sigil: String,
    pub tags: TagSet,
    pub timestamp: String,
    pub turn_id: String,
}

impl JournalEntry {
    pub fn new(
        turn: &DialogueTurn,
        observer: &Observer,
        affinity: f64,
        interference: String,
        previous: Option<Persona>,
    ) -> Self {
        Self {
            context: TurnContext {
                affinity,
                interference,
                previous_observer: previous.map(|p| p.name().to_string()),
            },
            input: turn.input.clone(),
            message: turn.message.clone(),
            metrics: TurnMetrics { delta_o: turn.delta_o, entropy: turn.entropy },
            mode: turn.mode,
            observer: ObserverSnapshot::from(observer),
            response: turn.response.clone(),
            sigil: turn.sigil.clone(),
            tags: turn.tags.clone(),
            timestamp: turn.timestamp.clone(),
            turn_id: turn.turn_id.clone(),
        }
    }

    pub fn entropy(&self) -> f64 {
        self.metrics.entropy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;
    use smallvec::smallvec;

    fn sample_turn() -> DialogueTurn {
        DialogueTurn {
            input: "hello".into(),
            response: "Generated: flow state activated".into(),
            message: "ok".into(),
            mode: Mode::Token,
            sigil: "✶ Collapse Star".into(),
            delta_o: 1.2,
            entropy: 0.4,
            tags: smallvec![Tag::Celebration],
            timestamp: "2026-01-01T00:00:00Z".into(),
            turn_id: "t-1".into(),
        }
    }

    #[test]
    fn test_document_keys() {
        let observer = Observer::roster().remove(1);
        let entry = JournalEntry::new(&sample_turn(), &observer, 1.0, "No interference detected.".into(), None);
        let v = serde_json::to_value(&entry).unwrap();

        assert_eq!(v["metrics"]["delta_O"], 1.2);
        assert_eq!(v["mode"], "token");
        assert_eq!(v["tags"][0], "#celebration");
        assert_eq!(v["observer"]["name"], "Fluid Mystic");
        assert!(v["context"]["previous_observer"].is_null());
    }
}
