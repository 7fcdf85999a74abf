//! Engine configuration.
//!
//! Every field has a default matching the reference behavior, so an
//! empty JSON object (or `EngineConfig::default()`) is a complete config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::TimelineId;
use crate::sampling::{EntropySampler, PowerLawBounds};
use crate::storage::{JournalStore, JsonFileStore, JsonLinesStore, MemoryStore};
use crate::{Error, Result};

/// Parameters of the entropy power law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub xmin: f64,
    pub xmax: f64,
    pub alpha: f64,
    /// Independent draws per turn; the turn keeps the largest.
    pub draws: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { xmin: 0.1, xmax: 10.0, alpha: 2.5, draws: 3 }
    }
}

impl SamplerConfig {
    pub fn sampler(&self) -> Result<EntropySampler> {
        if self.draws == 0 {
            return Err(Error::ConfigurationError("sampler.draws must be at least 1".into()));
        }
        Ok(EntropySampler::new(PowerLawBounds::new(self.xmin, self.xmax, self.alpha)?))
    }
}

/// Where each timeline's journal lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory (no persistence)
    Memory,

    /// `symbolic_journal_timelineN.json`, rewritten atomically per turn
    JsonDocument { dir: PathBuf },

    /// `symbolic_journal_timelineN.jsonl`, one record appended per turn
    JsonLines { dir: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::JsonDocument { dir: PathBuf::from(".") }
    }
}

impl StoreConfig {
    pub fn open(&self, timeline: TimelineId) -> Box<dyn JournalStore> {
        let stem = format!("symbolic_journal_timeline{}", timeline.number());
        match self {
            StoreConfig::Memory => Box::new(MemoryStore::new()),
            StoreConfig::JsonDocument { dir } => Box::new(JsonFileStore::new(dir.join(format!("{stem}.json")))),
            StoreConfig::JsonLines { dir } => Box::new(JsonLinesStore::new(dir.join(format!("{stem}.jsonl")))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for deterministic replay; OS entropy when absent.
    pub seed: Option<u64>,
    pub sampler: SamplerConfig,
    pub store: StoreConfig,
    /// Directory for analysis reports and graph exports.
    pub output_dir: PathBuf,
    /// Replay persisted entries into the analyzer and graph on startup.
    pub rehydrate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sampler: SamplerConfig::default(),
            store: StoreConfig::default(),
            output_dir: PathBuf::from("."),
            rehydrate: true,
        }
    }
}

impl EngineConfig {
    /// In-memory stores, no rehydration, fixed seed.
    pub fn ephemeral(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            store: StoreConfig::Memory,
            rehydrate: false,
            ..Self::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::ConfigurationError(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ConfigurationError(format!("invalid config {}: {e}", path.display())))
    }

    pub fn power_law_path(&self, timeline: TimelineId) -> PathBuf {
        self.output_dir.join(format!("power_law_analysis_timeline{}.txt", timeline.number()))
    }

    pub fn graph_path(&self, timeline: TimelineId) -> PathBuf {
        self.output_dir.join(format!("knowledge_graph_timeline{}.dot", timeline.number()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg: EngineConfig = serde_json::from_str(
            r#"{"seed": 7, "sampler": {"draws": 5}, "store": {"kind": "json_lines", "dir": "logs"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.sampler.draws, 5);
        assert_eq!(cfg.sampler.alpha, 2.5);
        assert_eq!(cfg.store, StoreConfig::JsonLines { dir: "logs".into() });
    }

    #[test]
    fn test_invalid_sampler_rejected() {
        let cfg = SamplerConfig { alpha: 1.0, ..SamplerConfig::default() };
        assert!(matches!(cfg.sampler(), Err(Error::DomainError(_))));
        let cfg = SamplerConfig { draws: 0, ..SamplerConfig::default() };
        assert!(matches!(cfg.sampler(), Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_output_paths() {
        let cfg = EngineConfig { output_dir: "out".into(), ..EngineConfig::default() };
        assert_eq!(cfg.graph_path(TimelineId::Two), PathBuf::from("out/knowledge_graph_timeline2.dot"));
        assert_eq!(
            cfg.power_law_path(TimelineId::One),
            PathBuf::from("out/power_law_analysis_timeline1.txt")
        );
    }
}
