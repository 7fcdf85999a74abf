//! Turn generation: canned response, metrics, advisory message and tags.
//!
//! Generation is split in two:
//!
//! ```text
//! generate(): draw phrase, delta_O, entropy from rng ─┐
//!                                                     ▼
//! compose():  pure (input, persona, draws, stamp) → DialogueTurn
//! ```
//!
//! `compose` is what replays and tests call with forced metrics.

use rand::Rng;
use smallvec::SmallVec;

use crate::model::{DialogueTurn, Observer, Persona, Tag, TagSet};
use crate::sampling::EntropySampler;
use crate::stamp::{Stamp, TurnStamper};

/// `delta_O` strictly above this is a divergence.
pub const DIVERGENCE_THRESHOLD: f64 = 1.5;

/// Entropy strictly above this is a spike.
pub const ENTROPY_SPIKE_THRESHOLD: f64 = 1.0;

/// Lower edge of the `delta_O` range `[0.9, 1.9)`.
pub const DELTA_O_BASE: f64 = 0.9;

pub const DIVERGENCE_WARNING: &str = "⚠️ Divergence detected. Semantic clarity unraveling.";
pub const FLUCTUATION_NOTICE: &str = "🔄 Meaning fluctuation within acceptable thresholds.";

const RESPONSE_PREFIX: &str = "Generated: ";

/// Persona names as they may appear in lower-cased input, plus a common
/// misspelling.
const OBSERVER_MENTIONS: [&str; 4] = ["recursive oracle", "fluid mystic", "grounded realist", "recusive"];

/// The random inputs to one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnDraws {
    /// Index into the persona's three phrases.
    pub phrase_index: usize,
    pub delta_o: f64,
    pub entropy: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct DialogueTurnGenerator {
    sampler: EntropySampler,
    entropy_draws: usize,
}

impl DialogueTurnGenerator {
    pub fn new(sampler: EntropySampler, entropy_draws: usize) -> Self {
        Self { sampler, entropy_draws: entropy_draws.max(1) }
    }

    pub fn sampler(&self) -> &EntropySampler {
        &self.sampler
    }

    /// Draw phrase, `delta_O` and entropy (in that order) and build the turn.
    pub fn generate<R, S>(&self, input: &str, observer: &Observer, rng: &mut R, stamper: &S) -> DialogueTurn
    where
        R: Rng + ?Sized,
        S: TurnStamper + ?Sized,
    {
        let phrases = observer.persona.phrases();
        let draws = TurnDraws {
            phrase_index: rng.gen_range(0..phrases.len()),
            delta_o: DELTA_O_BASE + rng.gen_range(0.0..1.0),
            entropy: self.sampler.sample_max(rng, self.entropy_draws),
        };
        compose(input, observer.persona, draws, stamper.stamp())
    }
}

/// Build a turn from already-drawn values.
pub fn compose(input: &str, persona: Persona, draws: TurnDraws, stamp: Stamp) -> DialogueTurn {
    let phrases = persona.phrases();
    let phrase = phrases[draws.phrase_index % phrases.len()];

    let mut turn = DialogueTurn {
        input: input.to_string(),
        response: format!("{RESPONSE_PREFIX}{phrase}"),
        message: advisory_message(draws.delta_o).to_string(),
        mode: persona.mode(),
        sigil: persona.sigil().to_string(),
        delta_o: draws.delta_o,
        entropy: draws.entropy,
        tags: SmallVec::new(),
        timestamp: stamp.timestamp,
        turn_id: stamp.turn_id,
    };
    turn.tags = generate_tags(&turn, &input.to_lowercase());
    turn
}

pub fn advisory_message(delta_o: f64) -> &'static str {
    if delta_o > DIVERGENCE_THRESHOLD {
        DIVERGENCE_WARNING
    } else {
        FLUCTUATION_NOTICE
    }
}

/// Evaluate every tag rule, in declaration order, over the turn and the
/// lower-cased input. Pure.
pub fn generate_tags(turn: &DialogueTurn, input_lower: &str) -> TagSet {
    let diverged = turn.delta_o > DIVERGENCE_THRESHOLD;
    let mentions = |needles: &[&str]| needles.iter().any(|n| input_lower.contains(n));

    let rules = [
        (turn.entropy > ENTROPY_SPIKE_THRESHOLD, Tag::EntropySpike),
        (diverged, Tag::HighDecoherence),
        (mentions(&["happy", "birth day"]), Tag::Celebration),
        (mentions(&["uncertainty", "doubt"]), Tag::Introspection),
        (mentions(&["quantum eye"]), Tag::SymbolRequest),
        (diverged && turn.response.contains("paradox"), Tag::Paradox),
        (mentions(&OBSERVER_MENTIONS), Tag::ObserverInteraction),
    ];

    rules.into_iter().filter(|(fired, _)| *fired).map(|(_, tag)| tag).collect()
}
