//! # fractal-journal — Dual-Timeline Observer Journal
//!
//! Generates synthetic dialogue turns on two alternating timelines and
//! journals them, feeding a power-law analysis and a sigil graph.
//!
//! ## Design Principles
//!
//! 1. **Explicit randomness**: one seeded `StdRng` is threaded through every
//!    draw, so a fixed seed replays a whole session
//! 2. **Closed personas**: `Persona` carries phrases, sigil and mode as data
//! 3. **Store-agnostic journal**: `JournalStore` is the contract between the
//!    journal and persistence
//! 4. **Visible coupling**: the cross-timeline previous-sigil pointer is a
//!    shared `SigilChain`, not hidden global state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fractal_journal::{Engine, EngineConfig, LineOutcome};
//!
//! # fn example() -> fractal_journal::Result<()> {
//! let mut engine = Engine::open(EngineConfig::ephemeral(42))?;
//!
//! if let LineOutcome::Turn(turn) = engine.process_line("I feel happy today")? {
//!     println!("[{}] {}: {}", turn.timeline, turn.observer, turn.response);
//!     println!("Tags: {:?}", turn.tags);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Per-input draw order
//!
//! look-ahead entropy → observer selection → response phrase → `delta_O`
//! → entropy draws (`sampler.draws` of them).

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod sampling;
pub mod generator;
pub mod analysis;
pub mod graph;
pub mod storage;
pub mod journal;
pub mod export;
pub mod config;
pub mod stamp;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Observer, Persona, AffinityModel, DialogueTurn, Mode, Tag, TagSet,
    TimelineId, TimelineState, JournalEntry, EdgeId, SymbolEdge,
};
pub use sampling::{EntropySampler, ObserverSelector, PowerLawBounds};
pub use generator::DialogueTurnGenerator;
pub use analysis::{PowerLawAnalyzer, PowerLawReport};
pub use graph::{GraphExport, RelationshipGraph};
pub use storage::{JournalStore, MemoryStore, JsonFileStore, JsonLinesStore};
pub use journal::{SigilChain, SymbolicJournal};
pub use config::{EngineConfig, SamplerConfig, StoreConfig};
pub use stamp::{SystemStamper, TurnStamper};

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

// ============================================================================
// Command surface
// ============================================================================

/// One line of front-end input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:observers`
    Observers,
    /// `:save_power_law`
    SavePowerLaw,
    /// `:save_knowledge_graph`
    SaveKnowledgeGraph,
    /// `:quit` or `:exit`
    Quit,
    /// Anything else is dialogue input.
    Input(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line {
            ":observers" => Command::Observers,
            ":save_power_law" => Command::SavePowerLaw,
            ":save_knowledge_graph" => Command::SaveKnowledgeGraph,
            ":quit" | ":exit" => Command::Quit,
            other => Command::Input(other.to_string()),
        }
    }
}

/// What the front end needs to print for a generated turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub timeline: TimelineId,
    pub observer: String,
    pub symbol: String,
    pub response: String,
    pub message: String,
    pub sigil: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Observers(Vec<Observer>),
    PowerLawSaved { timeline: TimelineId, path: PathBuf, exponent: f64 },
    GraphSaved { timeline: TimelineId, path: PathBuf, graph: GraphExport },
    Turn(TurnOutcome),
    Quit,
}

// ============================================================================
// Top-level Engine handle
// ============================================================================

/// The primary entry point: two timelines, their journals, one random
/// source and the shared sigil chain.
pub struct Engine<S: JournalStore> {
    config: EngineConfig,
    selector: ObserverSelector,
    generator: DialogueTurnGenerator,
    timelines: [TimelineState; 2],
    journals: [SymbolicJournal<S>; 2],
    chain: SigilChain,
    rng: StdRng,
    stamper: Box<dyn TurnStamper>,
    turn_count: u64,
}

impl Engine<Box<dyn JournalStore>> {
    /// Build an engine with the reference roster and the configured stores.
    pub fn open(config: EngineConfig) -> Result<Self> {
        let stores = [
            config.store.open(TimelineId::One),
            config.store.open(TimelineId::Two),
        ];
        Self::with_stores(config, Observer::roster(), stores)
    }
}

impl<S: JournalStore> Engine<S> {
    pub fn with_stores(config: EngineConfig, observers: Vec<Observer>, stores: [S; 2]) -> Result<Self> {
        let selector = ObserverSelector::new(observers)?;
        let generator = DialogueTurnGenerator::new(config.sampler.sampler()?, config.sampler.draws);
        let chain = SigilChain::new();
        let [one, two] = stores;
        let mut journals = [
            SymbolicJournal::new(one, chain.clone()),
            SymbolicJournal::new(two, chain.clone()),
        ];
        if config.rehydrate {
            for journal in &mut journals {
                journal.rehydrate();
            }
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            seed = ?config.seed,
            observers = selector.observers().len(),
            store_one = %journals[0].store().location(),
            store_two = %journals[1].store().location(),
            "engine opened"
        );
        Ok(Self {
            config,
            selector,
            generator,
            timelines: [TimelineState::new(TimelineId::One), TimelineState::new(TimelineId::Two)],
            journals,
            chain,
            rng,
            stamper: Box::new(SystemStamper),
            turn_count: 0,
        })
    }

    /// Replace the timestamp/id source.
    pub fn with_stamper(mut self, stamper: impl TurnStamper + 'static) -> Self {
        self.stamper = Box::new(stamper);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn observers(&self) -> &[Observer] {
        self.selector.observers()
    }

    /// Timeline the next processed line goes to.
    pub fn next_timeline(&self) -> TimelineId {
        TimelineId::for_turn(self.turn_count)
    }

    pub fn timeline(&self, id: TimelineId) -> &TimelineState {
        &self.timelines[id.index()]
    }

    pub fn journal(&self, id: TimelineId) -> &SymbolicJournal<S> {
        &self.journals[id.index()]
    }

    pub fn sigil_chain(&self) -> &SigilChain {
        &self.chain
    }

    /// Apply one front-end line to the timeline chosen by parity.
    ///
    /// Every line except `:quit`/`:exit` advances parity, including
    /// commands and lines whose processing fails.
    pub fn process_line(&mut self, line: &str) -> Result<LineOutcome> {
        let command = Command::parse(line);
        if command == Command::Quit {
            return Ok(LineOutcome::Quit);
        }
        let timeline = self.next_timeline();
        self.turn_count += 1;
        self.execute(timeline, command)
    }

    pub fn execute(&mut self, timeline: TimelineId, command: Command) -> Result<LineOutcome> {
        match command {
            Command::Observers => Ok(LineOutcome::Observers(self.observers().to_vec())),
            Command::SavePowerLaw => {
                let (path, exponent) = self.save_power_law(timeline)?;
                Ok(LineOutcome::PowerLawSaved { timeline, path, exponent })
            }
            Command::SaveKnowledgeGraph => {
                let (path, graph) = self.save_graph(timeline)?;
                Ok(LineOutcome::GraphSaved { timeline, path, graph })
            }
            Command::Quit => Ok(LineOutcome::Quit),
            Command::Input(input) => self.submit_to(timeline, &input).map(LineOutcome::Turn),
        }
    }

    /// Generate, journal and record one turn on `id`.
    ///
    /// If the journal write fails the timeline state is left untouched.
    pub fn submit_to(&mut self, id: TimelineId, input: &str) -> Result<TurnOutcome> {
        let [one, two] = &mut self.timelines;
        let (this, other) = match id {
            TimelineId::One => (one, &*two),
            TimelineId::Two => (two, &*one),
        };

        let next_future_entropy = self.generator.sampler().sample(&mut self.rng);
        let pressure = this.pressure(other);
        let observer = self.selector.select(pressure, &mut self.rng)?.clone();
        let turn = self.generator.generate(input, &observer, &mut self.rng, &*self.stamper);

        if let Err(e) = self.journals[id.index()].add_turn(&turn, &observer, this) {
            warn!(timeline = %id, error = %e, "turn not journaled");
            return Err(e);
        }
        this.record(observer.persona, turn.entropy, next_future_entropy);

        Ok(TurnOutcome {
            timeline: id,
            observer: observer.name().to_string(),
            symbol: observer.symbol.clone(),
            response: turn.response.clone(),
            message: turn.message.clone(),
            sigil: turn.sigil.clone(),
            tags: turn.tag_strings(),
        })
    }

    pub fn save_power_law(&self, id: TimelineId) -> Result<(PathBuf, f64)> {
        let path = self.config.power_law_path(id);
        let exponent = self.journals[id.index()].save_power_law(&path)?;
        Ok((path, exponent))
    }

    pub fn save_graph(&self, id: TimelineId) -> Result<(PathBuf, GraphExport)> {
        let path = self.config.graph_path(id);
        let graph = self.journals[id.index()].save_graph(&path)?;
        Ok((path, graph))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
