//! Wall-clock timestamps and turn identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Timestamp plus unique id for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub timestamp: String,
    pub turn_id: String,
}

/// Source of a fresh [`Stamp`] per turn.
pub trait TurnStamper {
    fn stamp(&self) -> Stamp;
}

/// UTC clock and random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamper;

impl TurnStamper for SystemStamper {
    fn stamp(&self) -> Stamp {
        Stamp {
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            turn_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Fixed timestamp and counter-based ids, for replay and tests.
#[derive(Debug)]
pub struct SequenceStamper {
    timestamp: String,
    next: AtomicU64,
}

impl SequenceStamper {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self { timestamp: timestamp.into(), next: AtomicU64::new(1) }
    }
}

impl TurnStamper for SequenceStamper {
    fn stamp(&self) -> Stamp {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Stamp { timestamp: self.timestamp.clone(), turn_id: format!("turn-{n}") }
    }
}
