//! Side-out scoring transitions.
//!
//! `MatchEngine` owns a `MatchConfig` and computes the next `MatchState`
//! from the current one and an event. Every transition:
//! - Takes the current state by reference and returns a new value
//! - Pushes exactly one pre-transition snapshot (except setup and undo)
//! - Performs no I/O
//!
//! Scoring events against a finished game are ignored and return the
//! input unchanged.

use tracing::{debug, info, warn};

use crate::core::config::{MatchConfig, TeamSide};
use crate::core::event::MatchEvent;
use crate::core::state::{MatchState, ServerNumber};
use crate::core::team::{CourtSlot, TeamId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The winning team.
    Winner(TeamId),
}

impl GameResult {
    /// Check if a team won.
    #[must_use]
    pub fn is_winner(&self, team: TeamId) -> bool {
        match self {
            GameResult::Winner(t) => *t == team,
        }
    }

    /// The winning team.
    #[must_use]
    pub fn winner(&self) -> TeamId {
        match self {
            GameResult::Winner(t) => *t,
        }
    }
}

/// Output of `MatchEngine::apply`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state to hold from now on.
    pub state: MatchState,

    /// Set only when this event ended the game.
    pub completed: Option<GameResult>,
}

/// Match engine for one game under a fixed configuration.
///
/// ## Example
///
/// ```
/// use rally_engine::core::{MatchConfig, MatchEvent, TeamId};
/// use rally_engine::rules::MatchEngine;
///
/// let engine = MatchEngine::new(MatchConfig::default());
/// let state = engine.initialize(TeamId::FIRST);
///
/// let state = engine.apply(&state, MatchEvent::AwardPoint(TeamId::FIRST)).state;
/// assert_eq!(state.scores[TeamId::FIRST], 1);
///
/// let state = engine.apply(&state, MatchEvent::Undo).state;
/// assert_eq!(state.scores[TeamId::FIRST], 0);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    /// Create an engine for the given configuration.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    // === Setup ===

    /// Fresh state with `initial_serving_team` serving.
    #[must_use]
    pub fn initialize(&self, initial_serving_team: TeamId) -> MatchState {
        MatchState::new(initial_serving_team)
    }

    /// Fresh state using the configured serving team and display side.
    #[must_use]
    pub fn initialize_from_config(&self) -> MatchState {
        let mut state = MatchState::new(self.config.initial_server_team);
        state.visual_side_swapped = self.config.initial_side == TeamSide::Right;
        state
    }

    /// Pick the first server of the game by the court they stand in.
    ///
    /// The first server must start on the right, so choosing the left-court
    /// player swaps that team's positions. The receiver is the right-court
    /// player of the other team. Not recorded in history.
    #[must_use]
    pub fn select_initial_server(&self, state: &MatchState, team: TeamId, slot: CourtSlot) -> MatchState {
        let mut next = state.clone();

        if slot == CourtSlot::Left {
            next.team_positions[team] = next.team_positions[team].swapped();
        }

        next.serving_team = team;
        next.server_number = ServerNumber::Two;
        next.server_player_idx = next.team_positions[team].right();
        next.receiver_player_idx = next.team_positions[team.opponent()].right();

        debug!(team = team.0, ?slot, "initial server selected");
        next
    }

    // === Live events ===

    /// A rally was won by `winning_team`.
    ///
    /// The serving team scores and its players trade courts. A rally won by
    /// the receiving team is a side-out, recorded as a single event.
    #[must_use]
    pub fn award_point(&self, state: &MatchState, winning_team: TeamId) -> MatchState {
        if state.is_game_over {
            warn!(team = winning_team.0, "point ignored: game is over");
            return state.clone();
        }

        let mut next = state.recorded();

        if winning_team != state.serving_team {
            pass_serve(&mut next);
            return next;
        }

        let receiving_team = winning_team.opponent();

        next.scores[winning_team] += 1;
        next.team_positions[winning_team] = next.team_positions[winning_team].swapped();
        next.receiver_player_idx = next.team_positions[receiving_team].other(next.receiver_player_idx);

        let score = next.scores[winning_team];

        if !next.auto_swapped && self.config.side_change_point == Some(score) {
            next.visual_side_swapped = !next.visual_side_swapped;
            next.auto_swapped = true;
            debug!(score, "automatic side change");
        }

        if self.config.is_winning_score(score, next.scores[receiving_team]) {
            next.is_game_over = true;
            info!(
                winner = winning_team.0,
                score,
                opponent_score = next.scores[receiving_team],
                "game over"
            );
        }

        next
    }

    /// Server fault: serve passes to the partner or to the other team.
    #[must_use]
    pub fn side_out(&self, state: &MatchState) -> MatchState {
        if state.is_game_over {
            warn!("side out ignored: game is over");
            return state.clone();
        }

        let mut next = state.recorded();
        pass_serve(&mut next);
        next
    }

    /// Swap a team's players between courts. Server and receiver pointers
    /// are left as they were.
    #[must_use]
    pub fn manual_swap_players(&self, state: &MatchState, team: TeamId) -> MatchState {
        let mut next = state.recorded();
        next.team_positions[team] = next.team_positions[team].swapped();
        next
    }

    /// Swap a team's players while the same person keeps serving.
    ///
    /// `server_player_idx` is an identity here and is not recomputed. The
    /// receiver marker always moves to the other receiving player, whichever
    /// team swapped.
    #[must_use]
    pub fn manual_swap_players_keep_server(&self, state: &MatchState, team: TeamId) -> MatchState {
        let mut next = state.recorded();
        next.team_positions[team] = next.team_positions[team].swapped();
        next.server_player_idx = state.server_player_idx;

        let receiving_team = state.receiving_team();
        next.receiver_player_idx = next.team_positions[receiving_team].other(state.receiver_player_idx);

        next
    }

    /// Toggle the display halves.
    #[must_use]
    pub fn manual_swap_sides(&self, state: &MatchState) -> MatchState {
        let mut next = state.recorded();
        next.visual_side_swapped = !next.visual_side_swapped;
        next
    }

    /// Rewind the most recent event.
    ///
    /// Empty history is a no-op. Undo always leaves the game live.
    #[must_use]
    pub fn undo(&self, state: &MatchState) -> MatchState {
        let Some(snapshot) = state.history.last().cloned() else {
            return state.clone();
        };

        let mut next = state.clone();
        next.history.pop_back();
        next.restore(snapshot);
        next.is_game_over = false;
        next
    }

    // === Dispatch ===

    /// Apply one event and report whether it ended the game.
    #[must_use]
    pub fn apply(&self, state: &MatchState, event: MatchEvent) -> Transition {
        let next = match event {
            MatchEvent::AwardPoint(team) => self.award_point(state, team),
            MatchEvent::SideOut => self.side_out(state),
            MatchEvent::SwapPlayers(team) => self.manual_swap_players(state, team),
            MatchEvent::SwapPlayersKeepServer(team) => self.manual_swap_players_keep_server(state, team),
            MatchEvent::SwapSides => self.manual_swap_sides(state),
            MatchEvent::Undo => self.undo(state),
        };

        let completed = if !state.is_game_over && next.is_game_over {
            self.is_terminal(&next)
        } else {
            None
        };

        debug!(
            event = %event,
            score_0 = next.scores[TeamId::FIRST],
            score_1 = next.scores[TeamId::SECOND],
            serving = next.serving_team.0,
            server_number = %next.server_number,
            history = next.history.len(),
            "event applied"
        );

        Transition { state: next, completed }
    }

    /// Check if the game is over.
    ///
    /// Returns the winner, or `None` while play continues.
    #[must_use]
    pub fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        if !state.is_game_over {
            return None;
        }

        let first = state.scores[TeamId::FIRST];
        let second = state.scores[TeamId::SECOND];
        let winner = match first.cmp(&second) {
            std::cmp::Ordering::Greater => TeamId::FIRST,
            std::cmp::Ordering::Less => TeamId::SECOND,
            std::cmp::Ordering::Equal => state.serving_team,
        };
        Some(GameResult::Winner(winner))
    }
}

/// Pass the serve in place: server 1 hands over to the partner, server 2
/// hands the serve to the other team's right-court player.
fn pass_serve(state: &mut MatchState) {
    let serving_team = state.serving_team;
    let receiving_team = serving_team.opponent();

    match state.server_number {
        ServerNumber::One => {
            state.server_number = ServerNumber::Two;
            state.server_player_idx = state.server_player_idx.teammate();
            state.receiver_player_idx = state.receiver_player_idx.teammate();
        }
        ServerNumber::Two => {
            state.serving_team = receiving_team;
            state.server_number = ServerNumber::One;
            state.server_player_idx = state.team_positions[receiving_team].right();
            state.receiver_player_idx = state.team_positions[serving_team].right();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerIdx, Positions, TeamPair};

    fn engine() -> MatchEngine {
        MatchEngine::new(MatchConfig::default())
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(TeamId::SECOND);
        assert!(!result.is_winner(TeamId::FIRST));
        assert!(result.is_winner(TeamId::SECOND));
        assert_eq!(result.winner(), TeamId::SECOND);
    }

    #[test]
    fn test_initialize_from_config() {
        let engine = MatchEngine::new(
            MatchConfig::default()
                .with_initial_server(TeamId::SECOND)
                .with_initial_side(TeamSide::Right),
        );
        let state = engine.initialize_from_config();

        assert_eq!(state.serving_team, TeamId::SECOND);
        assert_eq!(state.server_number, ServerNumber::Two);
        assert!(state.visual_side_swapped);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_select_initial_server_left_slot() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let state = engine.select_initial_server(&state, TeamId::SECOND, CourtSlot::Left);

        assert_eq!(state.serving_team, TeamId::SECOND);
        assert_eq!(state.team_positions[TeamId::SECOND], Positions([PlayerIdx(1), PlayerIdx(0)]));
        assert_eq!(state.server_player_idx, PlayerIdx(1));
        assert_eq!(state.receiver_player_idx, PlayerIdx(0));
        assert_eq!(state.server_slot(), CourtSlot::Right);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_select_initial_server_right_slot() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let state = engine.select_initial_server(&state, TeamId::FIRST, CourtSlot::Right);

        assert_eq!(state.team_positions[TeamId::FIRST], Positions::default());
        assert_eq!(state.server_player_idx, PlayerIdx(0));
        assert_eq!(state.server_number, ServerNumber::Two);
    }

    #[test]
    fn test_serving_team_scores() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let next = engine.award_point(&state, TeamId::FIRST);

        assert_eq!(next.scores, TeamPair::new(1, 0));
        assert_eq!(next.team_positions[TeamId::FIRST], Positions::default().swapped());
        assert_eq!(next.team_positions[TeamId::SECOND], Positions::default());
        assert_eq!(next.server_player_idx, PlayerIdx(0)); // Same server, now on the left
        assert_eq!(next.server_slot(), CourtSlot::Left);
        assert_eq!(next.receiver_player_idx, PlayerIdx(1));
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.serving_team, TeamId::FIRST);
    }

    #[test]
    fn test_receiving_team_rally_is_side_out() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let next = engine.award_point(&state, TeamId::SECOND);

        assert_eq!(next.scores, TeamPair::new(0, 0));
        assert_eq!(next.serving_team, TeamId::SECOND);
        assert_eq!(next.server_number, ServerNumber::One);
        assert_eq!(next.history.len(), 1);
    }

    #[test]
    fn test_side_out_server_one_to_two() {
        let engine = engine();
        let mut state = engine.initialize(TeamId::FIRST);
        state.server_number = ServerNumber::One;

        let next = engine.side_out(&state);

        assert_eq!(next.serving_team, TeamId::FIRST);
        assert_eq!(next.server_number, ServerNumber::Two);
        assert_eq!(next.server_player_idx, PlayerIdx(1));
        assert_eq!(next.receiver_player_idx, PlayerIdx(1));
        assert_eq!(next.team_positions, state.team_positions);
    }

    #[test]
    fn test_side_out_server_two_passes_serve() {
        let engine = engine();
        let mut state = engine.initialize(TeamId::FIRST);
        state.team_positions[TeamId::SECOND] = Positions::default().swapped();
        state.team_positions[TeamId::FIRST] = Positions::default().swapped();

        let next = engine.side_out(&state);

        assert_eq!(next.serving_team, TeamId::SECOND);
        assert_eq!(next.server_number, ServerNumber::One);
        assert_eq!(next.server_player_idx, PlayerIdx(1)); // Right-court player of team 1
        assert_eq!(next.receiver_player_idx, PlayerIdx(1)); // Right-court player of team 0
        assert_eq!(next.team_positions, state.team_positions);
    }

    #[test]
    fn test_finished_game_ignores_scoring() {
        let engine = engine();
        let mut state = engine.initialize(TeamId::FIRST);
        state.is_game_over = true;

        assert_eq!(engine.award_point(&state, TeamId::FIRST), state);
        assert_eq!(engine.side_out(&state), state);
    }

    #[test]
    fn test_manual_swap_players_plain() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let next = engine.manual_swap_players(&state, TeamId::SECOND);

        assert_eq!(next.team_positions[TeamId::SECOND], Positions::default().swapped());
        assert_eq!(next.receiver_player_idx, state.receiver_player_idx);
        assert_eq!(next.history.len(), 1);
    }

    #[test]
    fn test_swap_keep_server_on_serving_team() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let next = engine.manual_swap_players_keep_server(&state, TeamId::FIRST);

        assert_eq!(next.server_player_idx, PlayerIdx(0));
        assert_eq!(next.server_slot(), CourtSlot::Left);
        assert_eq!(next.receiver_player_idx, PlayerIdx(1));
        assert_eq!(next.receiver_slot(), CourtSlot::Left);
        assert_eq!(next.team_positions[TeamId::SECOND], state.team_positions[TeamId::SECOND]);
    }

    #[test]
    fn test_swap_keep_server_on_receiving_team() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);
        assert_eq!(state.receiver_slot(), CourtSlot::Right);

        let next = engine.manual_swap_players_keep_server(&state, TeamId::SECOND);

        assert_eq!(next.server_player_idx, state.server_player_idx);
        assert_eq!(next.receiver_player_idx, PlayerIdx(1));
        assert_eq!(next.receiver_slot(), CourtSlot::Right);
    }

    #[test]
    fn test_manual_swap_sides() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        let next = engine.manual_swap_sides(&state);
        assert!(next.visual_side_swapped);
        assert_eq!(next.scores, state.scores);

        let back = engine.manual_swap_sides(&next);
        assert!(!back.visual_side_swapped);
        assert_eq!(back.history.len(), 2);
    }

    #[test]
    fn test_undo_empty_history() {
        let engine = engine();
        let state = engine.initialize(TeamId::FIRST);

        assert_eq!(engine.undo(&state), state);
    }

    #[test]
    fn test_undo_clears_game_over() {
        let engine = MatchEngine::new(
            MatchConfig::default()
                .with_winning_point(1)
                .with_win_by_two(false)
                .with_side_change_point(None),
        );
        let state = engine.initialize(TeamId::FIRST);

        let over = engine.award_point(&state, TeamId::FIRST);
        assert!(over.is_game_over);

        let back = engine.undo(&over);
        assert!(!back.is_game_over);
        assert_eq!(back, state);
    }

    #[test]
    fn test_apply_reports_completion_once() {
        let engine = MatchEngine::new(MatchConfig::default().with_winning_point(2).with_side_change_point(None));
        let mut state = engine.initialize(TeamId::FIRST);

        let t = engine.apply(&state, MatchEvent::AwardPoint(TeamId::FIRST));
        assert_eq!(t.completed, None);
        state = t.state;

        let t = engine.apply(&state, MatchEvent::AwardPoint(TeamId::FIRST));
        assert_eq!(t.completed, Some(GameResult::Winner(TeamId::FIRST)));
        state = t.state;

        let t = engine.apply(&state, MatchEvent::SwapSides);
        assert_eq!(t.completed, None);
        assert!(t.state.is_game_over);
    }

    #[test]
    fn test_is_terminal() {
        let engine = engine();
        let mut state = engine.initialize(TeamId::FIRST);
        assert_eq!(engine.is_terminal(&state), None);

        state.scores = TeamPair::new(5, 11);
        state.is_game_over = true;
        assert_eq!(engine.is_terminal(&state), Some(GameResult::Winner(TeamId::SECOND)));
    }
}
