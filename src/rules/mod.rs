//! Match engine: pure state transitions for side-out doubles scoring.
//!
//! `MatchEngine` computes the next `MatchState` from the current state and
//! one event. Callers hold the state, dispatch events one at a time, and
//! persist or render the result themselves.

pub mod engine;

pub use engine::{GameResult, MatchEngine, Transition};
