//! Finished-match summary.

use serde::{Deserialize, Serialize};

use crate::core::{MatchConfig, MatchState, Team, TeamId, TeamPair};

/// What gets stored once a game is over.
///
/// The caller supplies the id and timestamp; the engine has no clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedMatch {
    pub id: String,
    pub teams: TeamPair<Team>,
    pub scores: TeamPair<u32>,
    pub winning_point: u32,
    /// Milliseconds since the Unix epoch.
    pub recorded_at_ms: u64,
    pub group_name: Option<String>,
}

impl CompletedMatch {
    /// Build the record from the final state.
    pub fn from_state(config: &MatchConfig, state: &MatchState, id: impl Into<String>, recorded_at_ms: u64) -> Self {
        Self {
            id: id.into(),
            teams: config.teams.clone(),
            scores: state.scores.clone(),
            winning_point: config.winning_point,
            recorded_at_ms,
            group_name: config.group_name.clone(),
        }
    }

    /// Higher-scoring team, or `None` on a tie.
    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        let first = self.scores[TeamId::FIRST];
        let second = self.scores[TeamId::SECOND];
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(TeamId::FIRST),
            std::cmp::Ordering::Less => Some(TeamId::SECOND),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Name of the winning team.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|team| self.teams[team].name.as_str())
    }
}
