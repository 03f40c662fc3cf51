//! Match configuration.
//!
//! A `MatchConfig` is fixed for the life of one game:
//! - Win condition: `winning_point` and `win_by_two`
//! - One-time display swap at `side_change_point`
//! - The two teams and who serves first
//!
//! The engine reads the configuration but never validates it.
//! `MatchConfig::validate` is the entry point for whoever builds the config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::team::{Team, TeamId, TeamPair};

/// Which half of the display a team is drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    #[default]
    Left,
    Right,
}

/// Configuration invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("winning point must be greater than zero")]
    ZeroWinningPoint,

    #[error("side change point {side_change} must be below winning point {winning}")]
    SideChangeTooLate { side_change: u32, winning: u32 },

    #[error("{team} has no name")]
    UnnamedTeam { team: TeamId },

    #[error("{team} player {player} has no name")]
    UnnamedPlayer { team: TeamId, player: usize },
}

/// Immutable per-match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Score a team must reach to win.
    pub winning_point: u32,

    /// Require a two-point margin once `winning_point` is reached.
    pub win_by_two: bool,

    /// Score at which the display halves swap once. `None` disables it.
    pub side_change_point: Option<u32>,

    /// The two teams, fixed for the match.
    pub teams: TeamPair<Team>,

    /// Team serving the first rally.
    pub initial_server_team: TeamId,

    /// Display half team 0 starts on.
    pub initial_side: TeamSide,

    /// Optional bracket/group label carried into the completed record.
    pub group_name: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            winning_point: 11,
            win_by_two: true,
            side_change_point: Some(6),
            teams: TeamPair::new(Team::new("Team A", "A1", "A2"), Team::new("Team B", "B1", "B2")),
            initial_server_team: TeamId::FIRST,
            initial_side: TeamSide::Left,
            group_name: None,
        }
    }
}

impl MatchConfig {
    /// Create a configuration for two teams with standard scoring
    /// (11 points, win by two, side change at 6).
    pub fn new(first: Team, second: Team) -> Self {
        Self {
            teams: TeamPair::new(first, second),
            ..Self::default()
        }
    }

    /// Set the winning score.
    #[must_use]
    pub fn with_winning_point(mut self, points: u32) -> Self {
        self.winning_point = points;
        self
    }

    /// Enable or disable win-by-two.
    #[must_use]
    pub fn with_win_by_two(mut self, enabled: bool) -> Self {
        self.win_by_two = enabled;
        self
    }

    /// Set (or clear) the automatic side-change score.
    #[must_use]
    pub fn with_side_change_point(mut self, point: Option<u32>) -> Self {
        self.side_change_point = point;
        self
    }

    /// Set the team that serves first.
    #[must_use]
    pub fn with_initial_server(mut self, team: TeamId) -> Self {
        self.initial_server_team = team;
        self
    }

    /// Set the display half team 0 starts on.
    #[must_use]
    pub fn with_initial_side(mut self, side: TeamSide) -> Self {
        self.initial_side = side;
        self
    }

    /// Set the group label.
    #[must_use]
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Get a team by ID.
    #[must_use]
    pub fn team(&self, team: TeamId) -> &Team {
        &self.teams[team]
    }

    /// Whether `score` against `opponent_score` ends the game.
    #[must_use]
    pub fn is_winning_score(&self, score: u32, opponent_score: u32) -> bool {
        score >= self.winning_point && (!self.win_by_two || score >= opponent_score + 2)
    }

    /// Check configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winning_point == 0 {
            return Err(ConfigError::ZeroWinningPoint);
        }
        if let Some(side_change) = self.side_change_point {
            if side_change >= self.winning_point {
                return Err(ConfigError::SideChangeTooLate {
                    side_change,
                    winning: self.winning_point,
                });
            }
        }
        for (team_id, team) in self.teams.iter() {
            if team.name.trim().is_empty() {
                return Err(ConfigError::UnnamedTeam { team: team_id });
            }
            if let Some(player) = team.players.iter().position(|p| p.name.trim().is_empty()) {
                return Err(ConfigError::UnnamedPlayer { team: team_id, player });
            }
        }
        Ok(())
    }
}
