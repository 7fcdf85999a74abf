//! A single generated dialogue turn.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// How the turn's response is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Semantic,
    Token,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Semantic => "semantic",
            Mode::Token => "token",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-based tags attached to a turn.
///
/// Declaration order is the order rules are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "#entropy-spike")]
    EntropySpike,
    #[serde(rename = "#high-decoherence")]
    HighDecoherence,
    #[serde(rename = "#celebration")]
    Celebration,
    #[serde(rename = "#introspection")]
    Introspection,
    #[serde(rename = "#symbol-request")]
    SymbolRequest,
    #[serde(rename = "#paradox")]
    Paradox,
    #[serde(rename = "#observer-interaction")]
    ObserverInteraction,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::EntropySpike => "#entropy-spike",
            Tag::HighDecoherence => "#high-decoherence",
            Tag::Celebration => "#celebration",
            Tag::Introspection => "#introspection",
            Tag::SymbolRequest => "#symbol-request",
            Tag::Paradox => "#paradox",
            Tag::ObserverInteraction => "#observer-interaction",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered tag list. Most turns carry two or fewer.
pub type TagSet = SmallVec<[Tag; 4]>;

/// A generated turn. Immutable once built; owned by the journal after
/// it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub input: String,
    pub response: String,
    pub message: String,
    pub mode: Mode,
    pub sigil: String,
    pub delta_o: f64,
    pub entropy: f64,
    pub tags: TagSet,
    pub timestamp: String,
    pub turn_id: String,
}

impl DialogueTurn {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Tags rendered the way the journal stores them.
    pub fn tag_strings(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}
