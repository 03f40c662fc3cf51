//! # rally-engine
//!
//! Live match state for doubles side-out scoring: serve rotation, score,
//! court positions, and undo.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every event maps (state, event) to a new state.
//!    No I/O, no clock, no shared mutable state.
//!
//! 2. **Values, Not Handles**: `MatchState` is a plain value. Callers hold it,
//!    replace it after each event, and persist or render it themselves.
//!
//! 3. **Cheap History**: Undo snapshots live in an `im::Vector`, so every
//!    state clones in O(1) and earlier states are never mutated.
//!
//! ## Modules
//!
//! - `core`: Teams, positions, configuration, state, events, RNG
//! - `rules`: `MatchEngine` transitions and game results
//! - `record`: Completed-match records and the resume codec
//! - `sim`: Seeded rally simulation

pub mod core;
pub mod rules;
pub mod record;
pub mod sim;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, CourtSlot, MatchConfig, MatchEvent, MatchRng, MatchSnapshot, MatchState,
    Player, PlayerIdx, Positions, ServerNumber, Team, TeamId, TeamPair, TeamSide,
};

pub use crate::rules::{GameResult, MatchEngine, Transition};

pub use crate::record::{decode_state, encode_state, CompletedMatch, SaveError};

pub use crate::sim::{RallySimulator, SimConfig, SimulatedGame};
