//! Random rally playout.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CourtSlot, MatchEvent, MatchRng, MatchState};
use crate::rules::{GameResult, MatchEngine};

/// Configuration for simulated games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Probability that the serving team wins a rally.
    pub serve_win_probability: f64,

    /// Probability that a step is an operator correction (swap or undo)
    /// instead of a rally.
    pub correction_rate: f64,

    /// Maximum events per game (undo-heavy configs may never finish).
    pub max_events: usize,

    /// Toss for the first serving team and court instead of using the
    /// configured server.
    pub random_first_server: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            serve_win_probability: 0.5,
            correction_rate: 0.0,
            max_events: 1_000,
            random_first_server: true,
        }
    }
}

impl SimConfig {
    /// Create a new simulation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the serving team's rally win probability.
    pub fn with_serve_win_probability(mut self, p: f64) -> Self {
        self.serve_win_probability = p;
        self
    }

    /// Set the operator correction rate.
    pub fn with_correction_rate(mut self, rate: f64) -> Self {
        self.correction_rate = rate;
        self
    }

    /// Set the event cap.
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Use the configured first server instead of a toss.
    pub fn with_fixed_first_server(mut self) -> Self {
        self.random_first_server = false;
        self
    }
}

/// One simulated game.
#[derive(Clone, Debug)]
pub struct SimulatedGame {
    /// Seed the game was played from.
    pub seed: u64,

    /// State after the initial server was chosen.
    pub initial_state: MatchState,

    /// Every event dispatched, in order.
    pub events: Vec<MatchEvent>,

    /// State after the last event.
    pub final_state: MatchState,

    /// Winner, or `None` if the event cap was hit first.
    pub result: Option<GameResult>,
}

impl SimulatedGame {
    /// Number of rallies played (points and side-outs).
    pub fn rally_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_scoring()).count()
    }
}

/// Plays games against a `MatchEngine`.
pub struct RallySimulator {
    engine: MatchEngine,
    config: SimConfig,
}

impl RallySimulator {
    /// Create a new simulator.
    pub fn new(engine: MatchEngine, config: SimConfig) -> Self {
        Self { engine, config }
    }

    /// Get the engine.
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Play a single game from `seed`.
    pub fn play_game(&self, seed: u64) -> SimulatedGame {
        let mut rng = MatchRng::new(seed);

        let mut state = self.engine.initialize_from_config();
        if self.config.random_first_server {
            let team = rng.gen_team();
            let slot = if rng.gen_bool(0.5) { CourtSlot::Left } else { CourtSlot::Right };
            state = self.engine.select_initial_server(&state, team, slot);
        } else {
            let team = self.engine.config().initial_server_team;
            state = self.engine.select_initial_server(&state, team, CourtSlot::Right);
        }
        let initial_state = state.clone();

        let mut events = Vec::new();
        while events.len() < self.config.max_events && !state.is_game_over {
            let event = self.next_event(&state, &mut rng);
            state = self.engine.apply(&state, event).state;
            events.push(event);
        }

        let result = self.engine.is_terminal(&state);

        debug!(seed, events = events.len(), ?result, "simulated game finished");

        SimulatedGame {
            seed,
            initial_state,
            events,
            final_state: state,
            result,
        }
    }

    /// Play `count` games with consecutive seeds starting at `first_seed`.
    pub fn play_games(&self, first_seed: u64, count: usize) -> Vec<SimulatedGame> {
        (0..count)
            .map(|i| self.play_game(first_seed.wrapping_add(i as u64)))
            .collect()
    }

    fn next_event(&self, state: &MatchState, rng: &mut MatchRng) -> MatchEvent {
        if rng.gen_bool(self.config.correction_rate) {
            let team = rng.gen_team();
            // swap players, swap keeping server, swap sides, undo
            return match rng.choose_weighted(&[1.0, 2.0, 1.0, 2.0]) {
                Some(0) => MatchEvent::SwapPlayers(team),
                Some(1) => MatchEvent::SwapPlayersKeepServer(team),
                Some(2) => MatchEvent::SwapSides,
                _ => MatchEvent::Undo,
            };
        }

        if rng.gen_bool(self.config.serve_win_probability) {
            MatchEvent::AwardPoint(state.serving_team)
        } else if rng.gen_bool(0.5) {
            MatchEvent::AwardPoint(state.receiving_team())
        } else {
            MatchEvent::SideOut
        }
    }
}
