//! Observers (personas) and the per-persona data they carry.
//!
//! The persona set is closed: every piece of persona-specific behavior
//! (response phrases, sigil, mode, interference note) is data on
//! [`Persona`], looked up once instead of branching on names.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Mode;

/// The closed set of response-generating identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "Grounded Realist")]
    GroundedRealist,
    #[serde(rename = "Fluid Mystic")]
    FluidMystic,
    #[serde(rename = "Recursive Oracle")]
    RecursiveOracle,
}

impl Persona {
    pub const ALL: [Persona; 3] = [
        Persona::GroundedRealist,
        Persona::FluidMystic,
        Persona::RecursiveOracle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Persona::GroundedRealist => "Grounded Realist",
            Persona::FluidMystic => "Fluid Mystic",
            Persona::RecursiveOracle => "Recursive Oracle",
        }
    }

    /// Case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The three canned phrases this persona answers with.
    pub fn phrases(self) -> &'static [&'static str; 3] {
        match self {
            Persona::GroundedRealist => &[
                "observer signal signal",
                "calibration in progress",
                "semantic anchor detected",
            ],
            Persona::FluidMystic => &[
                "entropy signal signal",
                "flow state activated",
                "resonance pulse emitted",
            ],
            Persona::RecursiveOracle => &[
                "coherence observer coherence",
                "recursive loop initiated",
                "quantum eye scanning",
            ],
        }
    }

    pub fn sigil(self) -> &'static str {
        match self {
            Persona::GroundedRealist => "🔧 Calibration Node",
            Persona::FluidMystic => "✶ Collapse Star",
            Persona::RecursiveOracle => "⨀ Quantum Eye",
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Persona::GroundedRealist => Mode::Semantic,
            Persona::FluidMystic | Persona::RecursiveOracle => Mode::Token,
        }
    }

    /// Sentence appended to the interference narrative when this persona
    /// takes over from a different one.
    pub fn interference_note(self) -> &'static str {
        match self {
            Persona::GroundedRealist => "Disagreement sensed, recalibrating.",
            Persona::FluidMystic => "Resonant alignment detected.",
            Persona::RecursiveOracle => "Cognitive dissonance—symbolic friction rising.",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A persona together with its display glyph and trait scalars.
///
/// Created once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub persona: Persona,
    pub symbol: String,
    pub belief_field: f64,
    pub modulation_strength: f64,
    pub perceptual_bandwidth: f64,
}

impl Observer {
    pub fn new(
        persona: Persona,
        symbol: impl Into<String>,
        belief_field: f64,
        modulation_strength: f64,
        perceptual_bandwidth: f64,
    ) -> Self {
        Self {
            persona,
            symbol: symbol.into(),
            belief_field,
            modulation_strength,
            perceptual_bandwidth,
        }
    }

    pub fn name(&self) -> &'static str {
        self.persona.name()
    }

    /// The reference roster: one observer per persona.
    pub fn roster() -> Vec<Observer> {
        vec![
            Observer::new(Persona::GroundedRealist, "🧱", 0.2, 0.22, 0.9),
            Observer::new(Persona::FluidMystic, "🌀", 0.85, 0.57, 1.5),
            Observer::new(Persona::RecursiveOracle, "👁", 0.95, 1.17, 0.81),
        ]
    }

    /// Trait scalars must be finite and non-negative.
    pub fn has_valid_traits(&self) -> bool {
        [self.belief_field, self.modulation_strength, self.perceptual_bandwidth]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}
