//! Match events: one user action each.
//!
//! Callers forward events one at a time to `MatchEngine::apply` and
//! replace their held state with the result.

use serde::{Deserialize, Serialize};

use super::team::TeamId;

/// A single live-scoring event.
///
/// ## Example
///
/// ```
/// use rally_engine::core::{MatchEvent, TeamId};
///
/// let rally = MatchEvent::AwardPoint(TeamId::FIRST);
/// assert!(rally.is_scoring());
/// assert!(!MatchEvent::Undo.is_scoring());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchEvent {
    /// The given team won the rally.
    AwardPoint(TeamId),
    /// Server fault: pass serve to the next server.
    SideOut,
    /// Swap a team's players between courts, no serve adjustment.
    SwapPlayers(TeamId),
    /// Swap a team's players while the active server stays the same person.
    SwapPlayersKeepServer(TeamId),
    /// Toggle which display half each team is drawn in.
    SwapSides,
    /// Rewind the previous event.
    Undo,
}

impl MatchEvent {
    /// Events that a finished game ignores.
    #[must_use]
    pub fn is_scoring(&self) -> bool {
        matches!(self, MatchEvent::AwardPoint(_) | MatchEvent::SideOut)
    }

    /// Short label for logs and bindings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::AwardPoint(_) => "award_point",
            MatchEvent::SideOut => "side_out",
            MatchEvent::SwapPlayers(_) => "swap_players",
            MatchEvent::SwapPlayersKeepServer(_) => "swap_players_keep_server",
            MatchEvent::SwapSides => "swap_sides",
            MatchEvent::Undo => "undo",
        }
    }
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::AwardPoint(team)
            | MatchEvent::SwapPlayers(team)
            | MatchEvent::SwapPlayersKeepServer(team) => write!(f, "{}({})", self.name(), team.0),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        assert_eq!(MatchEvent::AwardPoint(TeamId::SECOND).to_string(), "award_point(1)");
        assert_eq!(MatchEvent::SwapSides.to_string(), "swap_sides");
    }

    #[test]
    fn test_scoring_events() {
        assert!(MatchEvent::SideOut.is_scoring());
        assert!(!MatchEvent::SwapPlayers(TeamId::FIRST).is_scoring());
        assert!(!MatchEvent::SwapSides.is_scoring());
    }
}
