//! # Journal Data Model
//!
//! Plain DTOs shared by the sampler, generator, journal and stores.
//!
//! Design rule: no I/O, no randomness, no interior mutability here.
//! This module is pure data.

pub mod observer;
pub mod affinity;
pub mod turn;
pub mod timeline;
pub mod entry;
pub mod edge;

pub use observer::{Observer, Persona};
pub use affinity::{AffinityModel, DEFAULT_AFFINITY, SELF_AFFINITY};
pub use turn::{DialogueTurn, Mode, Tag, TagSet};
pub use timeline::{TimelineId, TimelineState};
pub use entry::{JournalEntry, ObserverSnapshot, TurnContext, TurnMetrics};
pub use edge::{EdgeId, SymbolEdge};
