//! Core match types: teams, configuration, state, events, RNG.
//!
//! Plain data only. Transitions live in `rules`.

pub mod team;
pub mod config;
pub mod state;
pub mod event;
pub mod rng;

pub use team::{CourtSlot, Player, PlayerIdx, Positions, Team, TeamId, TeamPair};
pub use config::{ConfigError, MatchConfig, TeamSide};
pub use state::{MatchSnapshot, MatchState, ServerNumber};
pub use event::MatchEvent;
pub use rng::MatchRng;
