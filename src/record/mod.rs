//! Records handed to the persistence layer.
//!
//! - `CompletedMatch`: the summary stored when a game finishes
//! - `save`: binary encoding of a live `MatchState` for resume
//!
//! Neither touches storage. Callers decide where the bytes go.

pub mod completed;
pub mod save;

pub use completed::CompletedMatch;
pub use save::{decode_state, encode_state, SaveError, SAVE_VERSION};
