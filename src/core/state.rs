//! Match state and history snapshots.
//!
//! ## MatchState
//!
//! The live value callers hold between events:
//! - Scores, serving team, server number
//! - Active server and receiver (team-local player identities)
//! - Position assignment per team
//! - Display flags and the one-shot auto-swap latch
//! - Undo history
//!
//! ## MatchSnapshot
//!
//! Every field of `MatchState` except `history` and `is_game_over`.
//! One snapshot is pushed before each event so undo can restore it.
//!
//! History is an `im::Vector`, so cloning a state shares structure with its
//! predecessor and a later transition can never mutate an earlier state.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::team::{CourtSlot, PlayerIdx, Positions, TeamId, TeamPair};

/// Which of the serving team's two players is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ServerNumber {
    One,
    Two,
}

impl From<ServerNumber> for u8 {
    fn from(n: ServerNumber) -> u8 {
        match n {
            ServerNumber::One => 1,
            ServerNumber::Two => 2,
        }
    }
}

impl TryFrom<u8> for ServerNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ServerNumber::One),
            2 => Ok(ServerNumber::Two),
            other => Err(format!("server number must be 1 or 2, got {other}")),
        }
    }
}

impl std::fmt::Display for ServerNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Pre-transition copy of every undoable field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub scores: TeamPair<u32>,
    pub serving_team: TeamId,
    pub server_number: ServerNumber,
    pub server_player_idx: PlayerIdx,
    pub receiver_player_idx: PlayerIdx,
    pub team_positions: TeamPair<Positions>,
    pub visual_side_swapped: bool,
    pub auto_swapped: bool,
}

/// Live match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Points per team.
    pub scores: TeamPair<u32>,

    /// Team currently serving.
    pub serving_team: TeamId,

    /// Which server of the serving team is up.
    pub server_number: ServerNumber,

    /// Active server, as a player of `serving_team`.
    pub server_player_idx: PlayerIdx,

    /// Active receiver, as a player of the receiving team.
    pub receiver_player_idx: PlayerIdx,

    /// Position assignment per team.
    pub team_positions: TeamPair<Positions>,

    /// Terminal flag. Only `undo` clears it.
    pub is_game_over: bool,

    /// Display-only: teams drawn on swapped halves.
    pub visual_side_swapped: bool,

    /// The automatic side swap already fired this game.
    pub auto_swapped: bool,

    /// Snapshots of prior states, oldest first.
    pub history: Vector<MatchSnapshot>,
}

impl MatchState {
    /// Fresh state for a game where `initial_serving_team` serves first.
    ///
    /// The opening serve is numbered as the second server.
    #[must_use]
    pub fn new(initial_serving_team: TeamId) -> Self {
        Self {
            scores: TeamPair::splat(0),
            serving_team: initial_serving_team,
            server_number: ServerNumber::Two,
            server_player_idx: PlayerIdx(0),
            receiver_player_idx: PlayerIdx(0),
            team_positions: TeamPair::splat(Positions::default()),
            is_game_over: false,
            visual_side_swapped: false,
            auto_swapped: false,
            history: Vector::new(),
        }
    }

    /// Team currently receiving.
    #[must_use]
    pub fn receiving_team(&self) -> TeamId {
        self.serving_team.opponent()
    }

    /// Court the active server stands in.
    #[must_use]
    pub fn server_slot(&self) -> CourtSlot {
        self.team_positions[self.serving_team].slot_of(self.server_player_idx)
    }

    /// Court the active receiver stands in.
    #[must_use]
    pub fn receiver_slot(&self) -> CourtSlot {
        self.team_positions[self.receiving_team()].slot_of(self.receiver_player_idx)
    }

    /// The spoken score: serving score, receiving score, server number.
    #[must_use]
    pub fn score_call(&self) -> (u32, u32, ServerNumber) {
        (
            self.scores[self.serving_team],
            self.scores[self.receiving_team()],
            self.server_number,
        )
    }

    /// Whether `undo` would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Capture the undoable fields.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            scores: self.scores.clone(),
            serving_team: self.serving_team,
            server_number: self.server_number,
            server_player_idx: self.server_player_idx,
            receiver_player_idx: self.receiver_player_idx,
            team_positions: self.team_positions.clone(),
            visual_side_swapped: self.visual_side_swapped,
            auto_swapped: self.auto_swapped,
        }
    }

    /// Overwrite the undoable fields from a snapshot.
    ///
    /// Leaves `history` and `is_game_over` untouched.
    pub fn restore(&mut self, snapshot: MatchSnapshot) {
        self.scores = snapshot.scores;
        self.serving_team = snapshot.serving_team;
        self.server_number = snapshot.server_number;
        self.server_player_idx = snapshot.server_player_idx;
        self.receiver_player_idx = snapshot.receiver_player_idx;
        self.team_positions = snapshot.team_positions;
        self.visual_side_swapped = snapshot.visual_side_swapped;
        self.auto_swapped = snapshot.auto_swapped;
    }

    /// Clone with the current snapshot appended to history.
    ///
    /// Every recorded transition starts here.
    #[must_use]
    pub(crate) fn recorded(&self) -> Self {
        let mut next = self.clone();
        next.history.push_back(self.snapshot());
        next
    }
}
