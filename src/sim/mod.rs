//! Seeded rally simulation.
//!
//! Drives a `MatchEngine` with random rallies and operator corrections.
//! Every game is reproducible from its seed, which makes the simulator a
//! source of long event sequences for invariant checks and benchmarks.

mod rally;

pub use rally::{RallySimulator, SimConfig, SimulatedGame};
