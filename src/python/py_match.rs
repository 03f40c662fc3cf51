//! Match bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{CourtSlot, MatchConfig, MatchEvent, MatchState, Team, TeamId};
use crate::record::{decode_state, encode_state};
use crate::rules::{GameResult, MatchEngine};
use crate::sim::{RallySimulator, SimConfig};

fn team_arg(team: u8) -> PyResult<TeamId> {
    TeamId::try_from(team).map_err(PyValueError::new_err)
}

fn build_config(
    team_a: (String, String, String),
    team_b: (String, String, String),
    winning_point: u32,
    win_by_two: bool,
    side_change_point: Option<u32>,
    first_server: u8,
) -> PyResult<MatchConfig> {
    let config = MatchConfig::new(
        Team::new(team_a.0, team_a.1, team_a.2),
        Team::new(team_b.0, team_b.1, team_b.2),
    )
    .with_winning_point(winning_point)
    .with_win_by_two(win_by_two)
    .with_side_change_point(side_change_point)
    .with_initial_server(team_arg(first_server)?);

    config
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(config)
}

/// Python wrapper holding an engine and the current match state.
///
/// Each method dispatches one event and replaces the held state.
#[pyclass(name = "Match")]
pub struct PyMatch {
    engine: MatchEngine,
    state: MatchState,
}

impl PyMatch {
    fn dispatch(&mut self, event: MatchEvent) -> Option<u8> {
        let transition = self.engine.apply(&self.state, event);
        self.state = transition.state;
        transition.completed.map(|r| r.winner().0)
    }
}

#[pymethods]
impl PyMatch {
    /// Create a new match.
    ///
    /// # Arguments
    /// - team_a, team_b: (team name, player 1, player 2)
    /// - winning_point: Score needed to win
    /// - win_by_two: Require a two-point margin
    /// - side_change_point: Score at which display halves swap, or None
    /// - first_server: Team serving first (0 or 1)
    #[new]
    #[pyo3(signature = (
        team_a,
        team_b,
        winning_point = 11,
        win_by_two = true,
        side_change_point = Some(6),
        first_server = 0
    ))]
    fn new(
        team_a: (String, String, String),
        team_b: (String, String, String),
        winning_point: u32,
        win_by_two: bool,
        side_change_point: Option<u32>,
        first_server: u8,
    ) -> PyResult<Self> {
        let config = build_config(team_a, team_b, winning_point, win_by_two, side_change_point, first_server)?;
        let engine = MatchEngine::new(config);
        let state = engine.initialize_from_config();
        Ok(Self { engine, state })
    }

    /// Choose the first server by team and court (`left=True` for the left court).
    #[pyo3(signature = (team, left = false))]
    fn select_initial_server(&mut self, team: u8, left: bool) -> PyResult<()> {
        let slot = if left { CourtSlot::Left } else { CourtSlot::Right };
        self.state = self.engine.select_initial_server(&self.state, team_arg(team)?, slot);
        Ok(())
    }

    /// Rally won by `team`. Returns the winner if this ended the game.
    fn point(&mut self, team: u8) -> PyResult<Option<u8>> {
        Ok(self.dispatch(MatchEvent::AwardPoint(team_arg(team)?)))
    }

    /// Server fault.
    fn side_out(&mut self) {
        self.dispatch(MatchEvent::SideOut);
    }

    /// Swap a team's players between courts.
    #[pyo3(signature = (team, keep_server = true))]
    fn swap_players(&mut self, team: u8, keep_server: bool) -> PyResult<()> {
        let team = team_arg(team)?;
        let event = if keep_server {
            MatchEvent::SwapPlayersKeepServer(team)
        } else {
            MatchEvent::SwapPlayers(team)
        };
        self.dispatch(event);
        Ok(())
    }

    /// Toggle the display halves.
    fn swap_sides(&mut self) {
        self.dispatch(MatchEvent::SwapSides);
    }

    /// Rewind the previous event.
    fn undo(&mut self) {
        self.dispatch(MatchEvent::Undo);
    }

    /// Winning team if the game is over, None otherwise.
    fn is_terminal(&self) -> Option<u8> {
        match self.engine.is_terminal(&self.state) {
            Some(GameResult::Winner(t)) => Some(t.0),
            None => None,
        }
    }

    #[getter]
    fn scores(&self) -> (u32, u32) {
        let [a, b] = self.state.scores.0;
        (a, b)
    }

    #[getter]
    fn serving_team(&self) -> u8 {
        self.state.serving_team.0
    }

    #[getter]
    fn server_number(&self) -> u8 {
        self.state.server_number.into()
    }

    #[getter]
    fn server_player(&self) -> u8 {
        self.state.server_player_idx.0
    }

    #[getter]
    fn receiver_player(&self) -> u8 {
        self.state.receiver_player_idx.0
    }

    #[getter]
    fn server_name(&self) -> String {
        let team = self.engine.config().team(self.state.serving_team);
        team.player(self.state.server_player_idx).name.clone()
    }

    #[getter]
    fn receiver_name(&self) -> String {
        let team = self.engine.config().team(self.state.receiving_team());
        team.player(self.state.receiver_player_idx).name.clone()
    }

    /// Position pairs as ((right, left), (right, left)).
    #[getter]
    fn team_positions(&self) -> ((u8, u8), (u8, u8)) {
        let pair = |team: TeamId| {
            let p = self.state.team_positions[team];
            (p.right().0, p.left().0)
        };
        (pair(TeamId::FIRST), pair(TeamId::SECOND))
    }

    #[getter]
    fn visual_side_swapped(&self) -> bool {
        self.state.visual_side_swapped
    }

    #[getter]
    fn history_len(&self) -> usize {
        self.state.history.len()
    }

    /// Encode the current state for resume.
    fn save<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = encode_state(&self.state).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Replace the current state with a saved one.
    fn load(&mut self, data: &[u8]) -> PyResult<()> {
        self.state = decode_state(data).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(())
    }

    fn __repr__(&self) -> String {
        let (serving, receiving, number) = self.state.score_call();
        format!(
            "Match(score={}-{}-{}, serving=T{}, over={})",
            serving, receiving, number, self.state.serving_team.0, self.state.is_game_over
        )
    }
}

/// Python wrapper for the rally simulator.
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    inner: RallySimulator,
}

#[pymethods]
impl PySimulator {
    #[new]
    #[pyo3(signature = (
        winning_point = 11,
        win_by_two = true,
        serve_win_probability = 0.5,
        correction_rate = 0.0,
        max_events = 1000
    ))]
    fn new(
        winning_point: u32,
        win_by_two: bool,
        serve_win_probability: f64,
        correction_rate: f64,
        max_events: usize,
    ) -> Self {
        let config = MatchConfig::default()
            .with_winning_point(winning_point)
            .with_win_by_two(win_by_two);
        let sim_config = SimConfig::new()
            .with_serve_win_probability(serve_win_probability)
            .with_correction_rate(correction_rate)
            .with_max_events(max_events);
        Self {
            inner: RallySimulator::new(MatchEngine::new(config), sim_config),
        }
    }

    /// Play one game. Returns (final scores, winner or None, event count).
    fn play(&self, seed: u64) -> ((u32, u32), Option<u8>, usize) {
        let game = self.inner.play_game(seed);
        let [a, b] = game.final_state.scores.0;
        ((a, b), game.result.map(|r| r.winner().0), game.events.len())
    }
}
