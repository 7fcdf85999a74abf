//! Per-timeline mutable context.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Persona;

/// One of the two independently evolving timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineId {
    One,
    Two,
}

impl TimelineId {
    /// Even turn counts advance timeline one, odd ones timeline two.
    pub fn for_turn(turn_count: u64) -> Self {
        if turn_count % 2 == 0 { TimelineId::One } else { TimelineId::Two }
    }

    pub fn other(self) -> Self {
        match self {
            TimelineId::One => TimelineId::Two,
            TimelineId::Two => TimelineId::One,
        }
    }

    /// 1-based number used in file names and front-end output.
    pub fn number(self) -> u8 {
        match self {
            TimelineId::One => 1,
            TimelineId::Two => 2,
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timeline {}", self.number())
    }
}

/// Running state of one timeline.
///
/// Timelines only see each other through `cumulative_entropy`, which
/// feeds the other side's selection pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    pub id: TimelineId,
    pub cumulative_entropy: f64,
    /// Look-ahead value sampled on the previous turn.
    pub future_entropy: f64,
    pub previous_observer: Option<Persona>,
    /// Personas selected so far, oldest first.
    pub memory: Vec<Persona>,
}

impl TimelineState {
    pub fn new(id: TimelineId) -> Self {
        Self {
            id,
            cumulative_entropy: 0.0,
            future_entropy: 0.0,
            previous_observer: None,
            memory: Vec::new(),
        }
    }

    pub fn is_first_turn(&self) -> bool {
        self.memory.is_empty()
    }

    pub fn last_persona(&self) -> Option<Persona> {
        self.memory.last().copied()
    }

    /// Selection pressure for this timeline given the other one.
    pub fn pressure(&self, other: &TimelineState) -> f64 {
        self.cumulative_entropy + self.future_entropy + other.cumulative_entropy
    }

    /// Fold a completed turn back into the timeline.
    pub fn record(&mut self, persona: Persona, entropy: f64, next_future_entropy: f64) {
        self.cumulative_entropy += entropy;
        self.future_entropy = next_future_entropy;
        self.memory.push(persona);
        self.previous_observer = Some(persona);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity() {
        assert_eq!(TimelineId::for_turn(0), TimelineId::One);
        assert_eq!(TimelineId::for_turn(1), TimelineId::Two);
        assert_eq!(TimelineId::for_turn(4), TimelineId::One);
        assert_eq!(TimelineId::One.other(), TimelineId::Two);
    }

    #[test]
    fn test_pressure_and_record() {
        let mut a = TimelineState::new(TimelineId::One);
        let mut b = TimelineState::new(TimelineId::Two);
        assert_eq!(a.pressure(&b), 0.0);

        a.record(Persona::FluidMystic, 1.5, 0.25);
        b.record(Persona::GroundedRealist, 2.0, 0.5);

        assert_eq!(a.pressure(&b), 1.5 + 0.25 + 2.0);
        assert_eq!(b.pressure(&a), 2.0 + 0.5 + 1.5);
        assert_eq!(a.last_persona(), Some(Persona::FluidMystic));
        assert!(!a.is_first_turn());
    }
}
