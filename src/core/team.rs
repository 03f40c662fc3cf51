//! Team and player identification, court slots, and per-team storage.
//!
//! ## TeamId
//!
//! Type-safe identifier for one of the two teams on court.
//!
//! ## Positions
//!
//! A team's position assignment: which of its two players stands in the
//! right and left service court. Always a permutation of the two players.
//!
//! ## TeamPair
//!
//! Fixed two-entry storage indexed by `TeamId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Team identifier. Exactly two teams exist: `TeamId(0)` and `TeamId(1)`.
///
/// Deserialization rejects any other value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct TeamId(pub u8);

impl TeamId {
    /// The first team.
    pub const FIRST: TeamId = TeamId(0);
    /// The second team.
    pub const SECOND: TeamId = TeamId(1);

    /// Create a new team ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "Team id must be 0 or 1");
        Self(id)
    }

    /// Get the raw team index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both teams in order.
    ///
    /// ```
    /// use rally_engine::core::TeamId;
    ///
    /// let teams: Vec<_> = TeamId::both().collect();
    /// assert_eq!(teams, vec![TeamId::FIRST, TeamId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = TeamId> {
        [TeamId::FIRST, TeamId::SECOND].into_iter()
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> u8 {
        team.0
    }
}

impl TryFrom<u8> for TeamId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 2 {
            Ok(TeamId(value))
        } else {
            Err(format!("team id must be 0 or 1, got {value}"))
        }
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Team-local player index (0 or 1 into the team's player pair).
///
/// This is an identity, not a court position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct PlayerIdx(pub u8);

impl PlayerIdx {
    /// Create a new player index.
    ///
    /// Panics if `idx` is not 0 or 1.
    #[must_use]
    pub const fn new(idx: u8) -> Self {
        assert!(idx < 2, "Player index must be 0 or 1");
        Self(idx)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The teammate.
    #[must_use]
    pub const fn teammate(self) -> Self {
        Self(1 - self.0)
    }
}

impl From<PlayerIdx> for u8 {
    fn from(idx: PlayerIdx) -> u8 {
        idx.0
    }
}

impl TryFrom<u8> for PlayerIdx {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 2 {
            Ok(PlayerIdx(value))
        } else {
            Err(format!("player index must be 0 or 1, got {value}"))
        }
    }
}

/// A service court on one team's half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourtSlot {
    /// Right service court (slot 0). Even-score serves start here.
    Right,
    /// Left service court (slot 1).
    Left,
}

impl CourtSlot {
    /// Slot index within a position pair.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CourtSlot::Right => 0,
            CourtSlot::Left => 1,
        }
    }
}

/// Position assignment `[right, left]` for one team.
///
/// ## Example
///
/// ```
/// use rally_engine::core::{CourtSlot, PlayerIdx, Positions};
///
/// let positions = Positions::default();
/// assert_eq!(positions.occupant(CourtSlot::Right), PlayerIdx(0));
///
/// let swapped = positions.swapped();
/// assert_eq!(swapped.occupant(CourtSlot::Right), PlayerIdx(1));
/// assert!(swapped.is_permutation());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Positions(pub [PlayerIdx; 2]);

impl Default for Positions {
    fn default() -> Self {
        Self([PlayerIdx(0), PlayerIdx(1)])
    }
}

impl Positions {
    /// Player in the given court.
    #[must_use]
    pub fn occupant(&self, slot: CourtSlot) -> PlayerIdx {
        self.0[slot.index()]
    }

    /// Player in the right court.
    #[must_use]
    pub fn right(&self) -> PlayerIdx {
        self.0[0]
    }

    /// Player in the left court.
    #[must_use]
    pub fn left(&self) -> PlayerIdx {
        self.0[1]
    }

    /// The same pair with the two players trading courts.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self([self.0[1], self.0[0]])
    }

    /// Court currently occupied by `player`.
    #[must_use]
    pub fn slot_of(&self, player: PlayerIdx) -> CourtSlot {
        if self.right() == player {
            CourtSlot::Right
        } else {
            CourtSlot::Left
        }
    }

    /// The occupant opposite `player`: the left player if `player` is on the
    /// right, otherwise the right player.
    #[must_use]
    pub fn other(&self, player: PlayerIdx) -> PlayerIdx {
        if player == self.right() {
            self.left()
        } else {
            self.right()
        }
    }

    /// Exactly one of each player, both in range.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        let [a, b] = self.0;
        a.0 < 2 && b.0 < 2 && a != b
    }
}

/// Per-team storage with O(1) access by `TeamId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamPair<T>(pub [T; 2]);

impl<T> TeamPair<T> {
    /// Create from explicit values for team 0 and team 1.
    pub fn new(first: T, second: T) -> Self {
        Self([first, second])
    }

    /// Iterate over (TeamId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        self.0.iter().enumerate().map(|(i, v)| (TeamId(i as u8), v))
    }
}

impl<T: Copy> TeamPair<T> {
    /// Create with both entries equal.
    pub fn splat(value: T) -> Self {
        Self([value, value])
    }
}

impl<T> Index<TeamId> for TeamPair<T> {
    type Output = T;

    fn index(&self, team: TeamId) -> &Self::Output {
        &self.0[team.index()]
    }
}

impl<T> IndexMut<TeamId> for TeamPair<T> {
    fn index_mut(&mut self, team: TeamId) -> &mut Self::Output {
        &mut self.0[team.index()]
    }
}

/// A named player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A doubles team: a name and exactly two players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: [Player; 2],
}

impl Team {
    /// Create a team from its name and two player names.
    pub fn new(name: impl Into<String>, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: [Player::new(first), Player::new(second)],
        }
    }

    /// Look up a player by team-local index.
    #[must_use]
    pub fn player(&self, idx: PlayerIdx) -> &Player {
        &self.players[idx.index()]
    }
}
